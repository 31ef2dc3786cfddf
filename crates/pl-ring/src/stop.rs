//! One ring position's occupancy and timing state.

use pl_core::{PalletId, Position};
use pl_layout::StopSpec;

use crate::{RingError, RingResult};

/// A pallet stop.
///
/// Invariants maintained by the methods below:
/// - at most one pallet occupies the stop;
/// - `dwell` is zero whenever the stop is empty and restarts at zero on
///   every arrival;
/// - `empty_for` is zero whenever the stop is occupied;
/// - `process_complete` is never set while the stop is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalletStop {
    pub position: Position,
    pub station_id: String,

    /// Ticks a pallet needs to travel into this stop from its upstream
    /// neighbour.
    pub upstream_transit: u64,

    /// Dwell after which the stop completes on its own (stops without an
    /// attached station process).
    pub cycle_ticks: u64,

    pub current_pallet: Option<PalletId>,
    pub dwell: u64,
    pub empty_for: u64,
    pub process_complete: bool,

    /// Emit trace events for arrivals and releases at this stop.
    pub traced: bool,
}

impl PalletStop {
    pub fn new(position: Position, station_id: impl Into<String>, upstream_transit: u64, cycle_ticks: u64) -> Self {
        Self {
            position,
            station_id: station_id.into(),
            upstream_transit,
            cycle_ticks,
            current_pallet: None,
            dwell: 0,
            empty_for: 0,
            process_complete: false,
            traced: false,
        }
    }

    /// Build from a layout row, with times already converted to ticks.
    pub fn from_spec(spec: &StopSpec, upstream_transit: u64, cycle_ticks: u64) -> Self {
        Self::new(spec.position(), spec.station_id.clone(), upstream_transit, cycle_ticks)
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.current_pallet.is_some()
    }

    /// Status pass: one tick of dwell or emptiness.
    #[inline]
    pub fn check_status(&mut self) {
        if self.is_occupied() {
            self.dwell += 1;
            self.empty_for = 0;
        } else {
            self.empty_for += 1;
            self.dwell = 0;
        }
    }

    /// A pallet arrives.
    pub fn occupy(&mut self, pallet: PalletId) -> RingResult<()> {
        if let Some(occupant) = self.current_pallet {
            return Err(RingError::StopOccupied { position: self.position, occupant, arriving: pallet });
        }
        self.current_pallet = Some(pallet);
        self.dwell = 0;
        self.empty_for = 0;
        Ok(())
    }

    /// The held pallet leaves; the completion latch is consumed.
    pub fn vacate(&mut self) -> RingResult<PalletId> {
        let pallet = self.current_pallet.take().ok_or(RingError::StopEmpty(self.position))?;
        self.dwell = 0;
        self.process_complete = false;
        Ok(pallet)
    }

    /// Latch `process_complete`.  Returns `true` if the latch was newly set.
    pub fn latch_complete(&mut self) -> RingResult<bool> {
        if !self.is_occupied() {
            return Err(RingError::StopEmpty(self.position));
        }
        let newly = !self.process_complete;
        self.process_complete = true;
        Ok(newly)
    }
}
