//! Verbosity selector for human-readable trace lines.
//!
//! Tracing is a side channel: the selector only decides which entities emit
//! `tracing` events, never what the simulation does.

use crate::Position;

/// Names the ring positions and station processes whose actions are traced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceSelector {
    /// Trace every entity regardless of the lists below.
    pub all: bool,
    /// Ring ordinals whose arrivals and releases are traced.
    pub positions: Vec<u16>,
    /// Station process names (robots, feeders, vision controllers).
    pub processes: Vec<String>,
}

impl TraceSelector {
    /// Trace nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Trace everything.
    pub fn everything() -> Self {
        Self { all: true, ..Self::default() }
    }

    pub fn with_positions(mut self, positions: impl IntoIterator<Item = u16>) -> Self {
        self.positions.extend(positions);
        self
    }

    pub fn with_processes<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.processes.extend(names.into_iter().map(Into::into));
        self
    }

    #[inline]
    pub fn position(&self, position: Position) -> bool {
        self.all || self.positions.contains(&position.0)
    }

    #[inline]
    pub fn process(&self, name: &str) -> bool {
        self.all || self.processes.iter().any(|p| p == name)
    }
}
