//! Declarative station-process specs.
//!
//! Specs refer to each other by name and express times in seconds.  The
//! `from_spec` constructors on the runtime types resolve names to typed ids
//! and seconds to ticks, failing on anything unknown or out of range.

use std::collections::HashSet;

use crate::{StationError, StationResult};

/// A named robot program and its duration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgramSpec {
    pub name: String,
    pub secs: f64,
}

impl ProgramSpec {
    pub fn new(name: impl Into<String>, secs: f64) -> Self {
        Self { name: name.into(), secs }
    }
}

/// Where a robot picks from, and with which program.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickSourceSpec {
    /// Feeder name.
    pub feeder: String,
    /// Shuttle slot (0 or 1).  Always 0 for tray feeders.
    pub slot: usize,
    /// Program run while picking from this source.
    pub program: String,
}

impl PickSourceSpec {
    pub fn new(feeder: impl Into<String>, slot: usize, program: impl Into<String>) -> Self {
        Self { feeder: feeder.into(), slot, program: program.into() }
    }
}

/// A pick / (inspect) / place robot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotSpec {
    pub name: String,
    pub programs: Vec<ProgramSpec>,
    /// Pick sources in priority order.
    pub picks: Vec<PickSourceSpec>,
    /// Optional inspection program run between pick and place.
    pub inspect: Option<String>,
    /// Terminal program; its completion is the robot's "process complete".
    pub place: String,
}

/// Vision-inspected tray feeder (inspect / shuffle / feed-in / pick).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrayFeederSpec {
    pub name: String,
    /// Vision controller shared with the other feeders of the cell.
    pub vision: String,
    pub camera: u16,
    pub inspect_secs: f64,
    pub shuffle_secs: f64,
    pub feed_in_secs: f64,
    /// How long a robot pick occupies the tray.
    pub pick_secs: f64,
    /// Per-item probability that a part is pick-able after a shuffle.
    pub yield_prob: f64,
    /// Feed in more parts when the tray holds fewer than this.
    pub total_qty_min: u32,
    pub feed_in_min: u32,
    pub feed_in_max: u32,
    /// Parts in the tray at start of run.
    pub initial_qty: u32,
}

/// Two-slot shuttle feeding a pair of robots.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShuttleFeederSpec {
    pub name: String,
    /// Display names of slot 0 and slot 1 (e.g. `["ST8", "ST9"]`).
    pub slots: [String; 2],
    /// Slot the shuttle sits at when the run starts.
    pub start_slot: usize,
    pub shuttle_secs: f64,
}

/// A single-slot vision controller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisionSpec {
    pub name: String,
    pub inspect_secs: f64,
}

impl VisionSpec {
    pub fn new(name: impl Into<String>, inspect_secs: f64) -> Self {
        Self { name: name.into(), inspect_secs }
    }
}

/// Fail on the first repeated name in `names`.
pub fn ensure_unique<'a>(kind: &'static str, names: impl IntoIterator<Item = &'a str>) -> StationResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(StationError::DuplicateName { kind, name: name.to_owned() });
        }
    }
    Ok(())
}
