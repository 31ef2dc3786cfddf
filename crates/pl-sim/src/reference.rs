//! The reference 21-position assembly line.
//!
//! Twenty pallets on a one-hour run, 0.01 s increment, 0.1 s clearing.
//! Robot cells:
//!
//! | Positions | Stations  | Cell                                                    |
//! |-----------|-----------|---------------------------------------------------------|
//! | 3, 4      | ST2, ST3  | one robot each, left/right tray feeders, shared vision  |
//! | 10, 11    | ST8, ST9  | handling robots fed by one shuttle                      |
//! | 12, 13    | ST10, ST11| handling robots fed by one shuttle                      |
//! | 17        | ST14/15   | two robots, four tray feeders, one vision controller    |
//!
//! Every other position releases on dwell.  Arrivals and releases at
//! positions 10 and 11 are traced.

use pl_core::{RunConfig, TraceSelector};
use pl_layout::{LayoutResult, LineLayout, StopSpec};
use pl_station::{PickSourceSpec, ProgramSpec, RobotSpec, ShuttleFeederSpec, TrayFeederSpec, VisionSpec};

use crate::{LineConfig, StopWiringSpec};

/// `(station, transit into the stop, dwell cycle)` per ordinal, in seconds.
const STOPS: [(&str, f64, f64); 21] = [
    ("ST1", 0.51, 2.34),
    ("ST20", 0.44, 2.41),
    ("ST2", 0.56, 0.0),
    ("ST3", 0.5, 0.0),
    ("ST4", 1.5, 1.35),
    ("ST5", 1.5, 1.35),
    ("ST5a", 0.35, 2.5),
    ("ST6", 0.35, 2.5),
    ("ST7", 0.46, 2.39),
    ("ST8", 0.53, 0.0),
    ("ST9", 0.4, 0.0),
    ("ST10", 0.4, 0.0),
    ("ST11", 0.37, 0.0),
    ("ST12", 0.63, 2.22),
    ("ST13", 0.46, 2.39),
    ("Buffer", 2.5, 0.35),
    ("ST14/15", 0.5, 0.0),
    ("ST16", 0.54, 2.31),
    ("ST17", 0.37, 2.48),
    ("ST18", 0.38, 2.47),
    ("ST19", 0.45, 2.4),
];

const PALLETS: usize = 20;

// Tray-feeder cells.
const PICK_PROB: f64 = 0.45;
const TOTAL_QTY_MIN: u32 = 2;
const FEED_IN_MIN: u32 = 5;
const FEED_IN_MAX: u32 = 10;
const INSPECT_SECS: f64 = 0.25;
const SHUFFLE_SECS: f64 = 1.5;
const FEED_IN_SECS: f64 = 2.0;
const TRAY_PICK_SECS: f64 = 0.88;
const TRAY_PLACE_SECS: f64 = 1.54;

// Shuttle cells.
const HANDLING_PICK_SECS: f64 = 0.95;
const HANDLING_INSPECT_SECS: f64 = 1.0;
const HANDLING_PLACE_SECS: f64 = 0.95;
/// Shuttle travel plus the pick it waits out.
const SHUTTLE_SECS: f64 = 0.25 + HANDLING_PICK_SECS;

pub fn reference_layout() -> LayoutResult<LineLayout> {
    LineLayout::new(
        STOPS
            .iter()
            .enumerate()
            .map(|(i, &(station, transit, cycle))| StopSpec::new(i as u16 + 1, station, transit, cycle))
            .collect(),
    )
}

/// The full reference line, station cells included.
pub fn reference_line() -> LayoutResult<LineConfig> {
    let mut line = LineConfig::new(RunConfig::default(), reference_layout()?, PALLETS);
    line.trace = TraceSelector::none().with_positions([10, 11]);

    // ST2 / ST3
    line.visions.push(VisionSpec::new("ST2/3 Vision", INSPECT_SECS));
    tray_cell(&mut line, "ST2", "ST2/3 Vision", [1, 2]);
    tray_cell(&mut line, "ST3", "ST2/3 Vision", [3, 4]);
    line.wiring.push(StopWiringSpec::new(3, ["ST2 Robot"]));
    line.wiring.push(StopWiringSpec::new(4, ["ST3 Robot"]));

    // ST8 / ST9 and ST10 / ST11
    shuttle_cell(&mut line, "ST8", "ST9", 10);
    shuttle_cell(&mut line, "ST10", "ST11", 12);

    // ST14 / ST15, both robots on one pallet
    line.visions.push(VisionSpec::new("ST14 Vision", INSPECT_SECS));
    tray_cell(&mut line, "ST14a", "ST14 Vision", [1, 2]);
    tray_cell(&mut line, "ST14b", "ST14 Vision", [3, 4]);
    line.wiring.push(StopWiringSpec::new(17, ["ST14a Robot", "ST14b Robot"]));

    Ok(line)
}

/// One robot picking from a left and a right tray feeder.
fn tray_cell(line: &mut LineConfig, station: &str, vision: &str, cameras: [u16; 2]) {
    let robot = format!("{station} Robot");
    let mut picks = Vec::new();
    for (side, camera) in ["Left", "Right"].into_iter().zip(cameras) {
        let feeder = format!("{station} {side} Feeder");
        let program = format!("pick {} feeder", side.to_lowercase());
        line.tray_feeders.push(TrayFeederSpec {
            name: feeder.clone(),
            vision: vision.to_owned(),
            camera,
            inspect_secs: INSPECT_SECS,
            shuffle_secs: SHUFFLE_SECS,
            feed_in_secs: FEED_IN_SECS,
            pick_secs: TRAY_PICK_SECS,
            yield_prob: PICK_PROB,
            total_qty_min: TOTAL_QTY_MIN,
            feed_in_min: FEED_IN_MIN,
            feed_in_max: FEED_IN_MAX,
            initial_qty: 0,
        });
        picks.push(PickSourceSpec::new(feeder, 0, program));
    }
    line.robots.push(RobotSpec {
        name: robot,
        programs: vec![
            ProgramSpec::new("pick left feeder", TRAY_PICK_SECS),
            ProgramSpec::new("pick right feeder", TRAY_PICK_SECS),
            ProgramSpec::new("place at pallet", TRAY_PLACE_SECS),
        ],
        picks,
        inspect: None,
        place: "place at pallet".into(),
    });
}

/// Two handling robots at adjacent positions sharing one shuttle.  The
/// shuttle starts at the second slot.
fn shuttle_cell(line: &mut LineConfig, first: &str, second: &str, first_position: u16) {
    let shuttle = format!("{first}/{second} Shuttle");
    line.shuttle_feeders.push(ShuttleFeederSpec {
        name: shuttle.clone(),
        slots: [first.to_owned(), second.to_owned()],
        start_slot: 1,
        shuttle_secs: SHUTTLE_SECS,
    });
    for (slot, station) in [first, second].into_iter().enumerate() {
        let robot = format!("{station} Handling");
        line.robots.push(RobotSpec {
            name: robot.clone(),
            programs: vec![
                ProgramSpec::new("pick", HANDLING_PICK_SECS),
                ProgramSpec::new("inspect", HANDLING_INSPECT_SECS),
                ProgramSpec::new("place", HANDLING_PLACE_SECS),
            ],
            picks: vec![PickSourceSpec::new(shuttle.clone(), slot, "pick")],
            inspect: Some("inspect".into()),
            place: "place".into(),
        });
        line.wiring.push(StopWiringSpec::new(first_position + slot as u16, [robot]));
    }
}
