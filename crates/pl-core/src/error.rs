//! Base error type for the pallet-loop crates.
//!
//! Sub-crates define their own enums for their own invariants and wrap this
//! one where a run-level setting is at fault.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{what} must be finite and last at least one tick (got {secs} s)")]
    NonPositiveDuration { what: String, secs: f64 },

    #[error("{what} must be a non-negative, finite number of seconds (got {secs})")]
    NegativeDuration { what: String, secs: f64 },

    #[error("{what} must be a probability in [0, 1] (got {p})")]
    Probability { what: String, p: f64 },
}

/// Shorthand result type for `pl-core`.
pub type CoreResult<T> = Result<T, CoreError>;
