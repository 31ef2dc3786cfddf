//! Single-slot completion mailbox between a station process and its stop.

use crate::{StationError, StationResult};

/// A latched "process complete" event.
///
/// The process posts once when its terminal program finishes; the ring
/// driver takes it exactly once.  Posting again before the driver has taken
/// the previous event is a modeling defect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completion {
    pending: bool,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post the event.  `owner` names the process for the error message.
    pub fn post(&mut self, owner: &str) -> StationResult<()> {
        if self.pending {
            return Err(StationError::CompletionPending(owner.to_owned()));
        }
        self.pending = true;
        Ok(())
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the event.  Returns `false` if nothing was pending.
    #[inline]
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
