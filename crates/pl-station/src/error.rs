use pl_core::{CameraId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationError {
    // ── Configuration (raised while building, never mid-run) ─────────────
    #[error("{owner}: unknown program {program:?}")]
    UnknownProgram { owner: String, program: String },

    #[error("{owner}: unknown {kind} {name:?}")]
    UnknownReference {
        owner: String,
        kind:  &'static str,
        name:  String,
    },

    #[error("duplicate {kind} name {name:?}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{owner}: program {program:?} is used both to pick and to {other}")]
    ConflictingRoles {
        owner:   String,
        program: String,
        other:   &'static str,
    },

    #[error("{owner}: {detail}")]
    Config { owner: String, detail: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    // ── Invariant violations (abort the run) ──────────────────────────────
    #[error("{process}: cannot start {requested:?} while {running:?} is in cycle")]
    AlreadyInCycle {
        process:   String,
        requested: String,
        running:   String,
    },

    #[error("{vision}: camera {requested} requested an inspection while camera {active} is active")]
    VisionBusy {
        vision:    String,
        active:    CameraId,
        requested: CameraId,
    },

    #[error("{feeder}: slot {slot} has no part ready to pick")]
    NotReadyForPick { feeder: String, slot: usize },

    #[error("{0}: completion posted while the previous one is still pending")]
    CompletionPending(String),
}

pub type StationResult<T> = Result<T, StationError>;
