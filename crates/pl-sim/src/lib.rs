//! `pl-sim` — tick loop orchestrator for the pallet-loop line simulator.
//!
//! # Two-pass tick loop
//!
//! ```text
//! for tick in 0..run.end_tick():
//!   ① Status    — stop timers, transit arrivals, robot programs, feeder
//!                 phases, vision inspections whose timers ran out.
//!   ② Decision  — fold robot completions into stops (dwell rule for stops
//!                 without a robot), record takt at the final position,
//!                 release every eligible stop at the same tick, then let
//!                 feeders and robots start their next actions.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`config`]    | `LineConfig`, `StopWiringSpec`                        |
//! | [`builder`]   | `SimBuilder` — name resolution and validation         |
//! | [`sim`]       | `Sim` — the tick loop                                 |
//! | [`observer`]  | `SimObserver`, `NoopObserver`                         |
//! | [`stats`]     | `SampleSeries`, `TaktMeter`, `RunReport`              |
//! | [`reference`] | The 21-position reference line                        |
//! | [`error`]     | `SimError`, `StatsError`                              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pl_sim::{NoopObserver, SimBuilder, reference_line};
//!
//! let mut sim = SimBuilder::new(reference_line()?).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{}", sim.report());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod reference;
pub mod sim;
pub mod stats;


pub use builder::SimBuilder;
pub use config::{LineConfig, StopWiringSpec};
pub use error::{SimError, SimResult, StatsError, StatsResult};
pub use observer::{NoopObserver, SimObserver};
pub use reference::{reference_layout, reference_line};
pub use sim::Sim;
pub use stats::{RunReport, SampleSeries, SampleSummary, TaktMeter};
