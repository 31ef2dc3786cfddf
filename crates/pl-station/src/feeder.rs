//! The feeder bank seen by robots: tray and shuttle feeders behind one enum.

use pl_core::{Tick, YieldSource};

use crate::{ShuttleFeeder, StationResult, TrayFeeder, VisionController};

/// Outcome of a feeder's decision step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FeederAction {
    /// A timed phase is running.
    Busy,
    /// Nothing to do (shuttle waiting for its nest to be emptied).
    Idle,
    /// Inspection requested and granted.
    RequestInspection,
    /// Ready for inspection but the vision controller is busy; retry later.
    AwaitVision,
    /// A pick-able part is waiting for a robot.
    ReadyForPick,
    FeedIn,
    Shuffle,
    ShuttleStart,
}

#[derive(Clone, Debug)]
pub enum Feeder {
    Tray(TrayFeeder),
    Shuttle(ShuttleFeeder),
}

impl Feeder {
    pub fn name(&self) -> &str {
        match self {
            Feeder::Tray(f)    => &f.name,
            Feeder::Shuttle(f) => &f.name,
        }
    }

    pub fn is_shuttle(&self) -> bool {
        matches!(self, Feeder::Shuttle(_))
    }

    /// Status pass.
    pub fn check_status<Y: YieldSource>(&mut self, now: Tick, rng: &mut Y) {
        match self {
            Feeder::Tray(f) => {
                f.check_status(now, rng);
            }
            Feeder::Shuttle(f) => {
                f.check_status(now);
            }
        }
    }

    /// Decision pass.  Tray feeders contend for their vision controller in
    /// `visions`.
    pub fn decide<Y: YieldSource>(
        &mut self,
        now:     Tick,
        visions: &mut [VisionController],
        rng:     &mut Y,
    ) -> StationResult<FeederAction> {
        match self {
            Feeder::Tray(f) => {
                let vision = &mut visions[f.vision.index()];
                f.decide(now, vision, rng)
            }
            Feeder::Shuttle(f) => Ok(f.decide(now)),
        }
    }

    /// Can the robot bound to `slot` pick right now?
    pub fn pick_ready(&self, slot: usize) -> bool {
        match self {
            Feeder::Tray(f)    => f.pick_ready(),
            Feeder::Shuttle(f) => f.pick_ready(slot),
        }
    }

    /// Hand one part to the robot bound to `slot`.
    pub fn take(&mut self, slot: usize, now: Tick) -> StationResult<()> {
        match self {
            Feeder::Tray(f)    => f.take(now),
            Feeder::Shuttle(f) => f.take(slot),
        }
    }
}
