//! Unit tests for pl-layout.

use std::io::Cursor;

use pl_core::Position;

use crate::{LayoutError, LineLayout, StopSpec, load_layout_reader};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn three_stops() -> Vec<StopSpec> {
    vec![
        StopSpec::new(1, "ST1", 0.51, 2.34),
        StopSpec::new(2, "ST2", 0.56, 0.0),
        StopSpec::new(3, "Buffer", 2.5, 0.35),
    ]
}

// ── LineLayout ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod line_layout {
    use super::*;

    #[test]
    fn sorts_by_ordinal() {
        let mut stops = three_stops();
        stops.reverse();
        let layout = LineLayout::new(stops).unwrap();
        let ordinals: Vec<u16> = layout.stops().iter().map(|s| s.position).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
        assert_eq!(layout.last_position(), Position(3));
    }

    #[test]
    fn rejects_gap() {
        let stops = vec![StopSpec::new(1, "A", 0.1, 1.0), StopSpec::new(3, "B", 0.1, 1.0)];
        match LineLayout::new(stops) {
            Err(LayoutError::NonContiguous { expected, found }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("expected NonContiguous, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_based_ordinals() {
        let stops = vec![StopSpec::new(0, "A", 0.1, 1.0), StopSpec::new(1, "B", 0.1, 1.0)];
        assert!(matches!(LineLayout::new(stops), Err(LayoutError::NonContiguous { .. })));
    }

    #[test]
    fn rejects_duplicate_ordinal() {
        let stops = vec![StopSpec::new(1, "A", 0.1, 1.0), StopSpec::new(1, "B", 0.1, 1.0)];
        assert!(LineLayout::new(stops).is_err());
    }

    #[test]
    fn rejects_single_stop() {
        let stops = vec![StopSpec::new(1, "A", 0.1, 1.0)];
        assert!(matches!(LineLayout::new(stops), Err(LayoutError::TooFewStops(1))));
    }

    #[test]
    fn rejects_negative_transit() {
        let stops = vec![StopSpec::new(1, "A", -0.1, 1.0), StopSpec::new(2, "B", 0.1, 1.0)];
        assert!(matches!(LineLayout::new(stops), Err(LayoutError::Duration(_))));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    #[test]
    fn loads_rows_in_any_order() {
        let csv = "position,station_id,transit_secs,cycle_secs\n\
                   2,ST20,0.44,2.41\n\
                   1,ST1,0.51,2.34\n";
        let layout = load_layout_reader(Cursor::new(csv)).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.stops()[0].station_id, "ST1");
        assert!((layout.stops()[1].transit_secs - 0.44).abs() < 1e-12);
    }

    #[test]
    fn trims_whitespace() {
        let csv = "position, station_id, transit_secs, cycle_secs\n\
                   1, ST1, 0.5, 1.0\n\
                   2, ST2, 0.5, 1.0\n";
        let layout = load_layout_reader(Cursor::new(csv)).unwrap();
        assert_eq!(layout.stops()[1].station_id, "ST2");
    }

    #[test]
    fn bad_number_is_parse_error() {
        let csv = "position,station_id,transit_secs,cycle_secs\n1,ST1,fast,1.0\n2,ST2,0.1,1.0\n";
        assert!(matches!(load_layout_reader(Cursor::new(csv)), Err(LayoutError::Parse(_))));
    }

    #[test]
    fn gap_in_csv_is_rejected() {
        let csv = "position,station_id,transit_secs,cycle_secs\n1,ST1,0.1,1.0\n3,ST3,0.1,1.0\n";
        assert!(matches!(
            load_layout_reader(Cursor::new(csv)),
            Err(LayoutError::NonContiguous { .. })
        ));
    }
}
