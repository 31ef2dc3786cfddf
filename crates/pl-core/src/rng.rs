//! Seeded simulation RNG and the injectable yield source.
//!
//! # Determinism strategy
//!
//! The only stochastic transitions in the line model live in the tray
//! feeders (the shuffle yield draw and the feed-in quantity).  Both go
//! through the [`YieldSource`] trait, so tests can substitute a scripted
//! source, and production runs use [`SimRng`], a `SmallRng` seeded from
//! `RunConfig::seed`.  A line with no tray feeders never touches the RNG and
//! is deterministic for every seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ── YieldSource ───────────────────────────────────────────────────────────────

/// Source of the random draws made by feeder logic.
pub trait YieldSource {
    /// One Bernoulli trial: `true` with probability `p` (clamped to [0, 1]).
    fn trial(&mut self, p: f64) -> bool;

    /// Uniform integer in `lo..=hi`.
    fn quantity(&mut self, lo: u32, hi: u32) -> u32;

    /// Number of successes in `n` independent trials with probability `p`.
    ///
    /// Each item gets its own trial; the result is always in `0..=n`.
    fn binomial(&mut self, n: u32, p: f64) -> u32 {
        (0..n).filter(|_| self.trial(p)).count() as u32
    }
}

impl<Y: YieldSource + ?Sized> YieldSource for &mut Y {
    #[inline]
    fn trial(&mut self, p: f64) -> bool {
        (**self).trial(p)
    }

    #[inline]
    fn quantity(&mut self, lo: u32, hi: u32) -> u32 {
        (**self).quantity(lo, hi)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG.  Single-threaded by construction: the tick loop is
/// sequential, so one instance serves every feeder.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

impl YieldSource for SimRng {
    #[inline]
    fn trial(&mut self, p: f64) -> bool {
        self.gen_bool(p)
    }

    #[inline]
    fn quantity(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo { lo } else { self.0.gen_range(lo..=hi) }
    }
}
