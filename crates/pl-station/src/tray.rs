//! Vision-inspected tray feeder.
//!
//! # Cycle
//!
//! ```text
//! feed-in ─▶ shuffle ─▶ (ready for inspect) ─▶ inspect ─▶ ready for pick
//!                ▲                                 │            │
//!                └──── nothing pick-able ◀─────────┘     robot picks
//!                                                               │
//!                          (ready for inspect) ◀──── pick ◀─────┘
//! ```
//!
//! Phases are mutually exclusive; `phase` holds the running one.  The
//! shuffle is the only place the yield probability is used: each part in the
//! tray gets its own Bernoulli trial.

use pl_core::{CameraId, FeederId, SimClock, Tick, VisionId, YieldSource};
use tracing::info;

use crate::{FeederAction, StationError, StationResult, TrayFeederSpec, VisionController};

/// The timed phases of a tray feeder.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrayPhase {
    Inspect,
    Shuffle,
    FeedIn,
    Pick,
}

/// Phase durations in ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrayTimes {
    pub inspect: u64,
    pub shuffle: u64,
    pub feed_in: u64,
    pub pick:    u64,
}

impl TrayTimes {
    #[inline]
    pub fn of(&self, phase: TrayPhase) -> u64 {
        match phase {
            TrayPhase::Inspect => self.inspect,
            TrayPhase::Shuffle => self.shuffle,
            TrayPhase::FeedIn  => self.feed_in,
            TrayPhase::Pick    => self.pick,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TrayFeeder {
    pub id:     FeederId,
    pub name:   String,
    pub vision: VisionId,
    pub camera: CameraId,
    pub times:  TrayTimes,

    pub yield_prob:    f64,
    pub total_qty_min: u32,
    pub feed_in_min:   u32,
    pub feed_in_max:   u32,

    /// Parts in the tray.
    pub total_qty: u32,
    /// Parts the last shuffle left in a pick-able orientation.
    pub pick_qty: u32,
    pub ready_for_pick: bool,
    pub ready_for_inspect: bool,

    /// Running phase and its start tick.
    phase: Option<(TrayPhase, Tick)>,

    pub traced: bool,
}

impl TrayFeeder {
    pub fn from_spec(
        id:     FeederId,
        spec:   &TrayFeederSpec,
        vision: VisionId,
        clock:  &SimClock,
        traced: bool,
    ) -> StationResult<Self> {
        let owner = spec.name.as_str();
        let times = TrayTimes {
            inspect: clock.positive_ticks(&format!("{owner} inspection"), spec.inspect_secs)?,
            shuffle: clock.positive_ticks(&format!("{owner} shuffle"), spec.shuffle_secs)?,
            feed_in: clock.positive_ticks(&format!("{owner} feed-in"), spec.feed_in_secs)?,
            pick:    clock.positive_ticks(&format!("{owner} pick"), spec.pick_secs)?,
        };
        if !(0.0..=1.0).contains(&spec.yield_prob) {
            return Err(pl_core::CoreError::Probability {
                what: format!("{owner} yield"),
                p:    spec.yield_prob,
            }
            .into());
        }
        if spec.feed_in_min > spec.feed_in_max || spec.feed_in_max == 0 {
            return Err(StationError::Config {
                owner:  owner.to_owned(),
                detail: format!(
                    "feed-in range {}..={} must be non-empty and positive",
                    spec.feed_in_min, spec.feed_in_max
                ),
            });
        }

        Ok(Self {
            id,
            name: spec.name.clone(),
            vision,
            camera: CameraId(spec.camera),
            times,
            yield_prob: spec.yield_prob,
            total_qty_min: spec.total_qty_min,
            feed_in_min: spec.feed_in_min,
            feed_in_max: spec.feed_in_max,
            total_qty: spec.initial_qty,
            pick_qty: 0,
            ready_for_pick: false,
            ready_for_inspect: false,
            phase: None,
            traced,
        })
    }

    #[inline]
    pub fn phase(&self) -> Option<TrayPhase> {
        self.phase.map(|(p, _)| p)
    }

    #[inline]
    pub fn in_cycle(&self) -> bool {
        self.phase.is_some()
    }

    // ── Status pass ───────────────────────────────────────────────────────

    /// Finish the running phase if its timer has run out.  A finished
    /// feed-in rolls straight into a shuffle.
    pub fn check_status<Y: YieldSource>(&mut self, now: Tick, rng: &mut Y) -> Option<TrayPhase> {
        let (phase, start) = self.phase?;
        if !now.is_past(start, self.times.of(phase)) {
            return None;
        }
        self.phase = None;
        match phase {
            TrayPhase::Inspect => {}
            TrayPhase::Shuffle | TrayPhase::Pick => self.ready_for_inspect = true,
            TrayPhase::FeedIn => self.shuffle(now, rng),
        }
        Some(phase)
    }

    // ── Decision pass ─────────────────────────────────────────────────────

    /// What the feeder would do next, given whether its vision controller is
    /// free.  Pure: nothing is started.
    pub fn next_action(&self, vision_idle: bool) -> FeederAction {
        if self.in_cycle() {
            FeederAction::Busy
        } else if self.ready_for_inspect {
            if vision_idle { FeederAction::RequestInspection } else { FeederAction::AwaitVision }
        } else if self.pick_qty > 0 {
            FeederAction::ReadyForPick
        } else if self.total_qty < self.total_qty_min {
            FeederAction::FeedIn
        } else {
            FeederAction::Shuffle
        }
    }

    /// Choose and start the next action.
    pub fn decide<Y: YieldSource>(
        &mut self,
        now:    Tick,
        vision: &mut VisionController,
        rng:    &mut Y,
    ) -> StationResult<FeederAction> {
        let action = self.next_action(vision.is_idle());
        match action {
            FeederAction::RequestInspection => {
                vision.start_inspection(now, self.camera)?;
                self.ready_for_inspect = false;
                self.start(TrayPhase::Inspect, now);
            }
            FeederAction::ReadyForPick => self.ready_for_pick = true,
            FeederAction::FeedIn => self.feed_in(now, rng),
            FeederAction::Shuffle => self.shuffle(now, rng),
            _ => {}
        }
        Ok(action)
    }

    // ── Actions ───────────────────────────────────────────────────────────

    /// Shuffle the tray and draw how many parts land pick-able.
    pub fn shuffle<Y: YieldSource>(&mut self, now: Tick, rng: &mut Y) {
        self.pick_qty = rng.binomial(self.total_qty, self.yield_prob).min(self.total_qty);
        self.start(TrayPhase::Shuffle, now);
        if self.traced {
            info!(tick = now.0, feeder = %self.name, parts = self.total_qty, pickable = self.pick_qty, "shuffling");
        }
    }

    /// Add a batch of parts to the tray.
    pub fn feed_in<Y: YieldSource>(&mut self, now: Tick, rng: &mut Y) {
        let qty = rng.quantity(self.feed_in_min, self.feed_in_max);
        self.total_qty += qty;
        self.start(TrayPhase::FeedIn, now);
        if self.traced {
            info!(tick = now.0, feeder = %self.name, parts = qty, "feeding in");
        }
    }

    /// A robot takes one pick-able part.
    pub fn take(&mut self, now: Tick) -> StationResult<()> {
        if !self.ready_for_pick || self.pick_qty == 0 || self.in_cycle() {
            return Err(StationError::NotReadyForPick { feeder: self.name.clone(), slot: 0 });
        }
        self.ready_for_pick = false;
        self.pick_qty -= 1;
        self.total_qty -= 1;
        self.start(TrayPhase::Pick, now);
        Ok(())
    }

    #[inline]
    pub fn pick_ready(&self) -> bool {
        self.ready_for_pick && !self.in_cycle()
    }

    fn start(&mut self, phase: TrayPhase, now: Tick) {
        self.phase = Some((phase, now));
    }
}
