//! `pl-core` — foundational types for the pallet-loop line simulator.
//!
//! This crate is a dependency of every other `pl-*` crate.  It has no
//! `pl-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`ids`]    | `PalletId`, `Position`, `RobotId`, `FeederId`, `VisionId`, …    |
//! | [`time`]   | `Tick`, `SimClock`, `RunConfig`                                 |
//! | [`rng`]    | `SimRng`, the `YieldSource` seam                                |
//! | [`trace`]  | `TraceSelector`                                                 |
//! | [`error`]  | `CoreError`, `CoreResult`                                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod trace;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{CameraId, FeederId, PalletId, Position, ProgramId, RobotId, VisionId};
pub use rng::{SimRng, YieldSource};
pub use time::{RunConfig, SimClock, Tick};
pub use trace::TraceSelector;
