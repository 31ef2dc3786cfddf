//! `pl-station` — the local process state machines attached to stations.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`config`]     | Declarative specs: `RobotSpec`, `TrayFeederSpec`, …          |
//! | [`program`]    | `ProgramTable`, `ProgramKind`                                |
//! | [`completion`] | `Completion` — single-slot "process complete" mailbox        |
//! | [`robot`]      | `Robot`, `PickSource`, `StopView`                            |
//! | [`tray`]       | `TrayFeeder` — inspect / shuffle / feed-in / pick            |
//! | [`shuttle`]    | `ShuttleFeeder` — two nests, one shuttle                     |
//! | [`feeder`]     | `Feeder` enum, `FeederAction`                                |
//! | [`vision`]     | `VisionController` — one inspection at a time                |
//! | [`error`]      | `StationError`, `StationResult<T>`                           |
//!
//! # Contract with the ring
//!
//! Every process has a status step (`check_status`: resolve timers that have
//! run out) and a decision step (`decide`: start new timed actions).  The
//! driver runs all status steps before any decision step.  A robot talks to
//! the ring only through [`StopView`] going in and its [`Completion`] coming
//! out; nothing here sees pallets or other stops.

pub mod completion;
pub mod config;
pub mod error;
pub mod feeder;
pub mod program;
pub mod robot;
pub mod shuttle;
pub mod tray;
pub mod vision;

#[cfg(test)]
mod tests;

pub use completion::Completion;
pub use config::{
    PickSourceSpec, ProgramSpec, RobotSpec, ShuttleFeederSpec, TrayFeederSpec, VisionSpec, ensure_unique,
};
pub use error::{StationError, StationResult};
pub use feeder::{Feeder, FeederAction};
pub use program::{Program, ProgramKind, ProgramTable};
pub use robot::{PickSource, Robot, StopView};
pub use shuttle::ShuttleFeeder;
pub use tray::{TrayFeeder, TrayPhase, TrayTimes};
pub use vision::VisionController;
