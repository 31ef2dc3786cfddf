//! Per-pallet transit state.

use pl_core::{PalletId, Position, Tick};

use crate::{RingError, RingResult};

/// Where a pallet is.  Exactly one of the two holds at any time, so the
/// "resident or in transit, never both" rule is enforced by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PalletState {
    /// Sitting at a stop.
    Resident(Position),
    /// Travelling to `to`, released at `since`.
    InTransit { to: Position, since: Tick },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pallet {
    pub id: PalletId,
    pub state: PalletState,
    /// The stop the pallet last left (equal to the initial stop before its
    /// first release).
    pub last_position: Position,
}

impl Pallet {
    pub fn resident(id: PalletId, at: Position) -> Self {
        Self { id, state: PalletState::Resident(at), last_position: at }
    }

    #[inline]
    pub fn in_transit(&self) -> bool {
        matches!(self.state, PalletState::InTransit { .. })
    }

    /// The stop the pallet sits at, or `None` while in transit.
    #[inline]
    pub fn current_position(&self) -> Option<Position> {
        match self.state {
            PalletState::Resident(p) => Some(p),
            PalletState::InTransit { .. } => None,
        }
    }

    #[inline]
    pub fn transit_start(&self) -> Option<Tick> {
        match self.state {
            PalletState::InTransit { since, .. } => Some(since),
            PalletState::Resident(_) => None,
        }
    }

    /// Leave the current stop toward its downstream neighbour on a ring of
    /// `len` stops.  Returns the destination.
    pub fn release(&mut self, now: Tick, len: usize) -> RingResult<Position> {
        let PalletState::Resident(from) = self.state else {
            return Err(RingError::AlreadyInTransit(self.id));
        };
        let to = from.next(len);
        self.last_position = from;
        self.state = PalletState::InTransit { to, since: now };
        Ok(to)
    }

    /// Finish a transit: become resident at the destination.
    pub(crate) fn arrive(&mut self) -> Position {
        match self.state {
            PalletState::InTransit { to, .. } => {
                self.state = PalletState::Resident(to);
                to
            }
            PalletState::Resident(p) => p,
        }
    }
}
