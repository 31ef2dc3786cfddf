//! Simulation observer trait for progress reporting and data collection.

use pl_core::Tick;
use pl_ring::{Release, Ring};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: release counter
///
/// ```rust,ignore
/// struct Releases(u64);
///
/// impl SimObserver for Releases {
///     fn on_release(&mut self, _release: &Release) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the status pass.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per pallet released during the decision pass.
    fn on_release(&mut self, _release: &Release) {}

    /// Called at the end of each tick with read-only access to the ring, so
    /// per-tick checks and snapshots need no knowledge of the sim internals.
    fn on_tick_end(&mut self, _tick: Tick, _ring: &Ring) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
