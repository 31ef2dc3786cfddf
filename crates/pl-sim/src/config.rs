//! Whole-line configuration.

use pl_core::{RunConfig, TraceSelector};
use pl_layout::LineLayout;
use pl_station::{RobotSpec, ShuttleFeederSpec, TrayFeederSpec, VisionSpec};

/// Robots attached to one ring position.
///
/// A stop wired to several robots latches complete only once every one of
/// them has finished its place.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopWiringSpec {
    pub position: u16,
    pub robots: Vec<String>,
}

impl StopWiringSpec {
    pub fn new<S: Into<String>>(position: u16, robots: impl IntoIterator<Item = S>) -> Self {
        Self { position, robots: robots.into_iter().map(Into::into).collect() }
    }
}

/// Everything needed to build a [`Sim`][crate::Sim].
///
/// Immutable once handed to [`SimBuilder`][crate::SimBuilder]; every name
/// and duration is checked there.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineConfig {
    pub run: RunConfig,
    pub layout: LineLayout,
    pub pallet_count: usize,
    /// Ordinal where takt samples are taken.  Default: the last ordinal.
    pub final_position: Option<u16>,

    pub robots: Vec<RobotSpec>,
    pub tray_feeders: Vec<TrayFeederSpec>,
    pub shuttle_feeders: Vec<ShuttleFeederSpec>,
    pub visions: Vec<VisionSpec>,
    pub wiring: Vec<StopWiringSpec>,

    pub trace: TraceSelector,
}

impl LineConfig {
    /// A line with no station processes: every stop releases on dwell.
    pub fn new(run: RunConfig, layout: LineLayout, pallet_count: usize) -> Self {
        Self {
            run,
            layout,
            pallet_count,
            final_position: None,
            robots: Vec::new(),
            tray_feeders: Vec::new(),
            shuttle_feeders: Vec::new(),
            visions: Vec::new(),
            wiring: Vec::new(),
            trace: TraceSelector::none(),
        }
    }
}
