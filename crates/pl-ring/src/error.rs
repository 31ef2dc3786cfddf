use pl_core::{PalletId, Position};
use thiserror::Error;

/// Ring invariant violations.  Every variant indicates a modeling defect and
/// aborts the run.
#[derive(Debug, Error)]
pub enum RingError {
    #[error("{position} does not exist on a ring of {len} stops")]
    UnknownPosition { position: Position, len: usize },

    #[error("{arriving} cannot occupy {position}: already held by {occupant}")]
    StopOccupied {
        position: Position,
        occupant: PalletId,
        arriving: PalletId,
    },

    #[error("{0} holds no pallet")]
    StopEmpty(Position),

    #[error("{0} cannot release: process not complete")]
    NotComplete(Position),

    #[error("{position} cannot release: {downstream} empty for {empty_for} ticks, clearing needs more than {clearing}")]
    Interlock {
        position:   Position,
        downstream: Position,
        empty_for:  u64,
        clearing:   u64,
    },

    #[error("{0} is already in transit")]
    AlreadyInTransit(PalletId),

    #[error("pallet count {count} must be between 1 and the number of stops ({stops})")]
    PalletCount { count: usize, stops: usize },

    #[error("stop at index {index} carries ordinal {found}; stops must be ordered 1..=N")]
    Misordered { index: usize, found: Position },

    #[error("pallet bookkeeping mismatch: {0}")]
    Inconsistent(String),
}

pub type RingResult<T> = Result<T, RingError>;
