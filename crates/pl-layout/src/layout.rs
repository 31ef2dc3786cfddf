//! The static station-layout table.

use serde::{Deserialize, Serialize};

use pl_core::{CoreError, Position};

use crate::{LayoutError, LayoutResult};

/// One row of the layout table: a ring position and its timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopSpec {
    /// 1-based ring ordinal.
    pub position: u16,
    /// Shop-floor station name (`"ST8"`, `"Buffer"`, …).
    pub station_id: String,
    /// Seconds a pallet takes to travel *into* this stop from the previous
    /// one.  Looked up by the destination stop, never the origin.
    pub transit_secs: f64,
    /// Dwell time after which the stop releases on its own.  Ignored for
    /// stops driven by a station process.
    pub cycle_secs: f64,
}

impl StopSpec {
    pub fn new(position: u16, station_id: impl Into<String>, transit_secs: f64, cycle_secs: f64) -> Self {
        Self { position, station_id: station_id.into(), transit_secs, cycle_secs }
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position(self.position)
    }
}

/// A validated ring topology, sorted by ordinal.
///
/// Guarantees: at least two stops, ordinals exactly `1..=N`, every time
/// finite and non-negative.  Deserializing goes through the same checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StopSpec>", into = "Vec<StopSpec>")]
pub struct LineLayout {
    stops: Vec<StopSpec>,
}

impl LineLayout {
    /// Validate and sort `stops`.
    pub fn new(mut stops: Vec<StopSpec>) -> LayoutResult<Self> {
        if stops.len() < 2 {
            return Err(LayoutError::TooFewStops(stops.len()));
        }
        stops.sort_by_key(|s| s.position);

        for (i, stop) in stops.iter().enumerate() {
            let expected = i as u16 + 1;
            if stop.position != expected {
                return Err(LayoutError::NonContiguous { expected, found: stop.position });
            }
            check_secs(&stop.station_id, "transit time", stop.transit_secs)?;
            check_secs(&stop.station_id, "cycle time", stop.cycle_secs)?;
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[StopSpec] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// The highest ordinal: the default takt-sampling position.
    pub fn last_position(&self) -> Position {
        Position(self.stops.len() as u16)
    }
}

impl TryFrom<Vec<StopSpec>> for LineLayout {
    type Error = LayoutError;

    fn try_from(stops: Vec<StopSpec>) -> LayoutResult<Self> {
        Self::new(stops)
    }
}

impl From<LineLayout> for Vec<StopSpec> {
    fn from(layout: LineLayout) -> Self {
        layout.stops
    }
}

fn check_secs(station: &str, what: &str, secs: f64) -> LayoutResult<()> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(CoreError::NegativeDuration { what: format!("{station} {what}"), secs }.into());
    }
    Ok(())
}
