//! Two-slot shuttle feeder serving a pair of robots.

use pl_core::{FeederId, SimClock, Tick};
use tracing::info;

use crate::{FeederAction, ShuttleFeederSpec, StationError, StationResult};

/// A shuttle that carries parts between two robot nests.
///
/// The robot at the slot the shuttle sits at picks from that slot's nest.
/// Once that nest is empty the shuttle moves to the other slot; arriving
/// there refills the nest it left.
#[derive(Clone, Debug)]
pub struct ShuttleFeeder {
    pub id:    FeederId,
    pub name:  String,
    pub slots: [String; 2],
    pub shuttle_ticks: u64,

    /// Slot the shuttle sits at (0 or 1).
    pub at: usize,
    /// Per-slot "nest has parts".
    pub nest_parts: [bool; 2],
    started: Option<Tick>,

    pub shuttles: u64,
    pub traced: bool,
}

impl ShuttleFeeder {
    pub fn from_spec(id: FeederId, spec: &ShuttleFeederSpec, clock: &SimClock, traced: bool) -> StationResult<Self> {
        if spec.start_slot > 1 {
            return Err(StationError::Config {
                owner:  spec.name.clone(),
                detail: format!("start slot {} must be 0 or 1", spec.start_slot),
            });
        }
        let shuttle_ticks = clock.positive_ticks(&format!("{} shuttle", spec.name), spec.shuttle_secs)?;
        Ok(Self {
            id,
            name: spec.name.clone(),
            slots: spec.slots.clone(),
            shuttle_ticks,
            at: spec.start_slot,
            nest_parts: [true, true],
            started: None,
            shuttles: 0,
            traced,
        })
    }

    #[inline]
    pub fn in_cycle(&self) -> bool {
        self.started.is_some()
    }

    /// Status pass: finish a move.  Returns the slot arrived at.
    pub fn check_status(&mut self, now: Tick) -> Option<usize> {
        let start = self.started?;
        if !now.is_past(start, self.shuttle_ticks) {
            return None;
        }
        self.started = None;
        self.nest_parts[self.at] = true;
        self.at = 1 - self.at;
        Some(self.at)
    }

    /// Decision pass: start a move when the nest at the current slot is
    /// empty.
    pub fn decide(&mut self, now: Tick) -> FeederAction {
        if self.in_cycle() {
            return FeederAction::Busy;
        }
        if self.nest_parts[self.at] {
            return FeederAction::Idle;
        }
        self.started = Some(now);
        self.shuttles += 1;
        if self.traced {
            info!(tick = now.0, feeder = %self.name, to = %self.slots[1 - self.at], "shuttle start");
        }
        FeederAction::ShuttleStart
    }

    #[inline]
    pub fn pick_ready(&self, slot: usize) -> bool {
        self.at == slot && self.nest_parts.get(slot).copied().unwrap_or(false)
    }

    /// The robot at `slot` empties the nest.
    pub fn take(&mut self, slot: usize) -> StationResult<()> {
        if !self.pick_ready(slot) {
            return Err(StationError::NotReadyForPick { feeder: self.name.clone(), slot });
        }
        self.nest_parts[slot] = false;
        Ok(())
    }
}
