use pl_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout parse error: {0}")]
    Parse(String),

    #[error("a ring needs at least 2 stops (got {0})")]
    TooFewStops(usize),

    #[error("ring ordinals must run 1..=N without gaps: expected {expected}, found {found}")]
    NonContiguous { expected: u16, found: u16 },

    #[error(transparent)]
    Duration(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
