//! CSV layout loader.
//!
//! # CSV format
//!
//! One row per ring position, in any order.
//!
//! ```csv
//! position,station_id,transit_secs,cycle_secs
//! 1,ST1,0.51,2.34
//! 2,ST20,0.44,2.41
//! 3,ST2,0.56,0.0
//! ```
//!
//! The rows go through [`LineLayout::new`], so gaps in the ordinals or
//! negative times are rejected here rather than discovered mid-run.

use std::io::Read;
use std::path::Path;

use crate::{LayoutError, LayoutResult, LineLayout, StopSpec};

/// Load a [`LineLayout`] from a CSV file.
pub fn load_layout_csv(path: &Path) -> LayoutResult<LineLayout> {
    let file = std::fs::File::open(path)?;
    load_layout_reader(file)
}

/// Like [`load_layout_csv`] but accepts any `Read` source.
pub fn load_layout_reader<R: Read>(reader: R) -> LayoutResult<LineLayout> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let stops = csv_reader
        .deserialize::<StopSpec>()
        .map(|row| row.map_err(|e| LayoutError::Parse(e.to_string())))
        .collect::<LayoutResult<Vec<_>>>()?;

    LineLayout::new(stops)
}
