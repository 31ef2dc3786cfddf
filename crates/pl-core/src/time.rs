//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  The mapping to
//! seconds is held in `SimClock`:
//!
//!   secs = tick * tick_secs
//!
//! Every configured duration (transit times, program times, the clearing
//! interlock, …) is converted once, at build time, into a whole number of
//! ticks.  From then on all timer arithmetic is integer arithmetic: a dwell
//! counter that grows by one per tick compares exactly against a cycle time,
//! with none of the drift a repeatedly summed `0.01` would accumulate.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// `true` once a timer started at `start` and lasting `duration` ticks
    /// has strictly run out, i.e. `self > start + duration`.
    #[inline]
    pub fn is_past(self, start: Tick, duration: u64) -> bool {
        self.0 > start.0 + duration
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

/// Ticks elapsed from `rhs` to `self`; zero if `rhs` is later.
impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds represented by one tick (the global time increment).
    pub tick_secs: f64,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_secs: f64) -> Self {
        Self { tick_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.secs(self.current_tick.0)
    }

    /// Seconds spanned by `ticks` ticks.
    #[inline]
    pub fn secs(&self, ticks: u64) -> f64 {
        ticks as f64 * self.tick_secs
    }

    /// Nearest whole number of ticks spanning `secs` seconds.
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        (secs / self.tick_secs).round().max(0.0) as u64
    }

    // ── Validated conversions ─────────────────────────────────────────────

    /// Convert a duration that must span at least one tick (program times,
    /// feeder phases, inspections).  Positive values that round to zero
    /// ticks are rejected too.
    pub fn positive_ticks(&self, what: &str, secs: f64) -> CoreResult<u64> {
        let ticks = if secs.is_finite() { self.ticks_for_secs(secs) } else { 0 };
        if ticks == 0 {
            return Err(CoreError::NonPositiveDuration { what: what.to_owned(), secs });
        }
        Ok(ticks)
    }

    /// Convert a duration that may be zero (transit times, dwell cycle times,
    /// the clearing interlock).
    pub fn non_negative_ticks(&self, what: &str, secs: f64) -> CoreResult<u64> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(CoreError::NegativeDuration { what: what.to_owned(), secs });
        }
        Ok(self.ticks_for_secs(secs))
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs())
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Run-level settings shared by every entity in the simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Global time increment in seconds.  Default: 0.01.
    pub tick_secs: f64,

    /// Total simulated seconds.  The run stops once simulated time exceeds
    /// this value.
    pub run_secs: f64,

    /// How long a downstream stop must sit empty before an upstream stop may
    /// release a pallet into it.
    pub clearing_secs: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_secs:     0.01,
            run_secs:      3_600.0,
            clearing_secs: 0.1,
            seed:          42,
        }
    }
}

impl RunConfig {
    /// Reject settings that would make the tick loop meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.tick_secs.is_finite() || self.tick_secs <= 0.0 {
            return Err(CoreError::NonPositiveDuration {
                what: "time increment".into(),
                secs: self.tick_secs,
            });
        }
        if !self.run_secs.is_finite() || self.run_secs < 0.0 {
            return Err(CoreError::NegativeDuration { what: "run length".into(), secs: self.run_secs });
        }
        if !self.clearing_secs.is_finite() || self.clearing_secs < 0.0 {
            return Err(CoreError::NegativeDuration {
                what: "pallet clearing time".into(),
                secs: self.clearing_secs,
            });
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_secs)
    }

    /// The tick at which the run ends (exclusive upper bound): the first
    /// tick whose time exceeds `run_secs`.
    pub fn end_tick(&self) -> Tick {
        Tick(self.make_clock().ticks_for_secs(self.run_secs) + 1)
    }
}
