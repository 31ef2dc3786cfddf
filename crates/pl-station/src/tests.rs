//! Unit tests for pl-station.

use pl_core::{CameraId, FeederId, ProgramId, RobotId, SimClock, Tick, VisionId, YieldSource};

use crate::{
    Feeder, FeederAction, PickSourceSpec, ProgramKind, ProgramSpec, Robot, RobotSpec, ShuttleFeeder,
    ShuttleFeederSpec, StationError, StopView, TrayFeeder, TrayFeederSpec, TrayPhase, VisionController,
    VisionSpec,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn clock() -> SimClock {
    SimClock::new(0.01)
}

/// Yield source with fixed answers.
struct Scripted {
    yes: bool,
    qty: u32,
}

impl YieldSource for Scripted {
    fn trial(&mut self, _p: f64) -> bool {
        self.yes
    }

    fn quantity(&mut self, _lo: u32, _hi: u32) -> u32 {
        self.qty
    }
}

fn tray_spec(name: &str, camera: u16) -> TrayFeederSpec {
    TrayFeederSpec {
        name: name.into(),
        vision: "Vision".into(),
        camera,
        inspect_secs: 0.25,
        shuffle_secs: 1.5,
        feed_in_secs: 2.0,
        pick_secs: 0.88,
        yield_prob: 0.45,
        total_qty_min: 2,
        feed_in_min: 5,
        feed_in_max: 10,
        initial_qty: 0,
    }
}

fn tray(name: &str, camera: u16) -> TrayFeeder {
    TrayFeeder::from_spec(FeederId(0), &tray_spec(name, camera), VisionId(0), &clock(), false).unwrap()
}

fn vision() -> VisionController {
    VisionController::from_spec(VisionId(0), &VisionSpec::new("Vision", 0.25), &clock(), false).unwrap()
}

fn shuttle() -> Feeder {
    let spec = ShuttleFeederSpec {
        name: "Shuttle".into(),
        slots: ["A".into(), "B".into()],
        start_slot: 0,
        shuttle_secs: 1.2,
    };
    Feeder::Shuttle(ShuttleFeeder::from_spec(FeederId(0), &spec, &clock(), false).unwrap())
}

/// pick 0.95 s / inspect 1.0 s / place 0.95 s, picking from shuttle slot 0.
fn robot_spec() -> RobotSpec {
    RobotSpec {
        name: "A".into(),
        programs: vec![
            ProgramSpec::new("pick", 0.95),
            ProgramSpec::new("inspect", 1.0),
            ProgramSpec::new("place", 0.95),
        ],
        picks: vec![PickSourceSpec::new("Shuttle", 0, "pick")],
        inspect: Some("inspect".into()),
        place: "place".into(),
    }
}

fn refill(feeders: &mut [Feeder], slot: usize) {
    if let Feeder::Shuttle(s) = &mut feeders[0] {
        s.at = slot;
        s.nest_parts[slot] = true;
    }
}

const EMPTY: StopView = StopView { occupied: false, complete: false };
const WAITING: StopView = StopView { occupied: true, complete: false };
const DONE: StopView = StopView { occupied: true, complete: true };

// ── Completion ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod completion {
    use crate::{Completion, StationError};

    #[test]
    fn posted_once_taken_once() {
        let mut c = Completion::new();
        assert!(!c.take());
        c.post("R").unwrap();
        assert!(c.is_pending());
        assert!(c.take());
        assert!(!c.take());
    }

    #[test]
    fn double_post_is_an_error() {
        let mut c = Completion::new();
        c.post("R").unwrap();
        assert!(matches!(c.post("R"), Err(StationError::CompletionPending(owner)) if owner == "R"));
    }
}

// ── Programs ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod program {
    use super::*;
    use crate::ProgramTable;

    #[test]
    fn seconds_become_ticks() {
        let table = ProgramTable::from_specs("R", &robot_spec().programs, &clock()).unwrap();
        assert_eq!(table.len(), 3);
        let pick = table.lookup("R", "pick").unwrap();
        assert_eq!(table.get("R", pick).unwrap().ticks, 95);
    }

    #[test]
    fn id_past_the_table_is_unknown() {
        let table = ProgramTable::from_specs("R", &robot_spec().programs, &clock()).unwrap();
        assert!(matches!(
            table.get("R", ProgramId(3)),
            Err(StationError::UnknownProgram { owner, .. }) if owner == "R"
        ));
    }

    #[test]
    fn unknown_name() {
        let table = ProgramTable::from_specs("R", &robot_spec().programs, &clock()).unwrap();
        assert!(matches!(table.lookup("R", "weld"), Err(StationError::UnknownProgram { .. })));
    }

    #[test]
    fn duplicate_names_rejected() {
        let specs = [ProgramSpec::new("pick", 1.0), ProgramSpec::new("pick", 2.0)];
        assert!(matches!(
            ProgramTable::from_specs("R", &specs, &clock()),
            Err(StationError::DuplicateName { kind: "program", .. })
        ));
    }

    #[test]
    fn zero_duration_rejected() {
        let specs = [ProgramSpec::new("pick", 0.0)];
        assert!(matches!(ProgramTable::from_specs("R", &specs, &clock()), Err(StationError::Core(_))));
    }
}

// ── Vision ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vision {
    use super::*;

    #[test]
    fn one_inspection_at_a_time() {
        let mut v = vision();
        v.start_inspection(Tick(0), CameraId(1)).unwrap();
        // second request one tick (0.01 s) later
        match v.start_inspection(Tick(1), CameraId(2)) {
            Err(StationError::VisionBusy { active, requested, .. }) => {
                assert_eq!(active, CameraId(1));
                assert_eq!(requested, CameraId(2));
            }
            other => panic!("expected VisionBusy, got {other:?}"),
        }
        assert_eq!(v.active_camera(), Some(CameraId(1)));
    }

    #[test]
    fn finishes_strictly_after_duration() {
        let mut v = vision();
        v.start_inspection(Tick(10), CameraId(3)).unwrap();
        assert_eq!(v.check_status(Tick(35)), None);
        assert_eq!(v.check_status(Tick(36)), Some(CameraId(3)));
        assert!(v.is_idle());
        assert_eq!(v.inspections, 1);
    }
}

// ── Tray feeder ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tray {
    use super::*;

    #[test]
    fn empty_tray_feeds_in_first() {
        let t = tray("L", 1);
        assert_eq!(t.total_qty, 0);
        assert_eq!(t.next_action(true), FeederAction::FeedIn);
    }

    #[test]
    fn full_cycle() {
        let mut t = tray("L", 1);
        let mut v = vision();
        let mut rng = Scripted { yes: true, qty: 6 };

        assert_eq!(t.decide(Tick(0), &mut v, &mut rng).unwrap(), FeederAction::FeedIn);
        assert_eq!(t.total_qty, 6);

        // feed-in (200 ticks) rolls straight into a shuffle
        assert_eq!(t.check_status(Tick(200), &mut rng), None);
        assert_eq!(t.check_status(Tick(201), &mut rng), Some(TrayPhase::FeedIn));
        assert_eq!(t.phase(), Some(TrayPhase::Shuffle));
        assert_eq!(t.pick_qty, 6);

        assert_eq!(t.check_status(Tick(352), &mut rng), Some(TrayPhase::Shuffle));
        assert!(t.ready_for_inspect);
        assert_eq!(t.decide(Tick(352), &mut v, &mut rng).unwrap(), FeederAction::RequestInspection);
        assert!(v.in_cycle());

        assert_eq!(v.check_status(Tick(378)), Some(CameraId(1)));
        assert_eq!(t.check_status(Tick(378), &mut rng), Some(TrayPhase::Inspect));
        assert_eq!(t.decide(Tick(378), &mut v, &mut rng).unwrap(), FeederAction::ReadyForPick);
        assert!(t.pick_ready());

        t.take(Tick(378)).unwrap();
        assert_eq!((t.pick_qty, t.total_qty), (5, 5));
        assert_eq!(t.phase(), Some(TrayPhase::Pick));
        assert!(!t.pick_ready());

        // a finished pick leaves the tray waiting for re-inspection
        assert_eq!(t.check_status(Tick(467), &mut rng), Some(TrayPhase::Pick));
        assert!(t.ready_for_inspect);
    }

    #[test]
    fn nothing_pickable_reshuffles() {
        let mut t = tray("L", 1);
        let mut v = vision();
        let mut rng = Scripted { yes: false, qty: 5 };
        t.total_qty = 5;
        assert_eq!(t.decide(Tick(0), &mut v, &mut rng).unwrap(), FeederAction::Shuffle);
        assert_eq!(t.pick_qty, 0);
        t.check_status(Tick(151), &mut rng);
        t.decide(Tick(151), &mut v, &mut rng).unwrap();
        v.check_status(Tick(177));
        t.check_status(Tick(177), &mut rng);
        assert_eq!(t.next_action(v.is_idle()), FeederAction::Shuffle);
    }

    #[test]
    fn shared_vision_serializes_inspections() {
        let mut left = tray("L", 1);
        let mut right = tray("R", 2);
        let mut v = vision();
        let mut rng = Scripted { yes: true, qty: 5 };
        left.ready_for_inspect = true;
        right.ready_for_inspect = true;

        assert_eq!(left.decide(Tick(0), &mut v, &mut rng).unwrap(), FeederAction::RequestInspection);
        assert_eq!(right.decide(Tick(0), &mut v, &mut rng).unwrap(), FeederAction::AwaitVision);
        assert_eq!(right.decide(Tick(1), &mut v, &mut rng).unwrap(), FeederAction::AwaitVision);
        assert!(right.ready_for_inspect);

        v.check_status(Tick(26));
        assert_eq!(right.decide(Tick(26), &mut v, &mut rng).unwrap(), FeederAction::RequestInspection);
        assert_eq!(v.active_camera(), Some(CameraId(2)));
    }

    #[test]
    fn take_without_ready_part_is_an_error() {
        let mut t = tray("L", 1);
        assert!(matches!(t.take(Tick(0)), Err(StationError::NotReadyForPick { slot: 0, .. })));
    }

    #[test]
    fn invalid_yield_rejected() {
        let mut spec = tray_spec("L", 1);
        spec.yield_prob = 1.5;
        let r = TrayFeeder::from_spec(FeederId(0), &spec, VisionId(0), &clock(), false);
        assert!(matches!(r, Err(StationError::Core(_))));
    }

    #[test]
    fn inverted_feed_in_range_rejected() {
        let mut spec = tray_spec("L", 1);
        spec.feed_in_min = 10;
        spec.feed_in_max = 5;
        let r = TrayFeeder::from_spec(FeederId(0), &spec, VisionId(0), &clock(), false);
        assert!(matches!(r, Err(StationError::Config { .. })));
    }
}

// ── Shuttle feeder ────────────────────────────────────────────────────────────

#[cfg(test)]
mod shuttle {
    use super::*;

    #[test]
    fn alternates_between_slots() {
        let mut feeders = vec![shuttle()];
        let Feeder::Shuttle(s) = &mut feeders[0] else { unreachable!() };

        assert!(s.pick_ready(0));
        assert!(!s.pick_ready(1));
        assert_eq!(s.decide(Tick(0)), FeederAction::Idle);

        s.take(0).unwrap();
        assert_eq!(s.decide(Tick(5)), FeederAction::ShuttleStart);
        assert_eq!(s.decide(Tick(6)), FeederAction::Busy);
        assert_eq!(s.check_status(Tick(125)), None);
        assert_eq!(s.check_status(Tick(126)), Some(1));
        // the nest left behind is refilled on arrival
        assert_eq!(s.nest_parts, [true, true]);
        assert!(s.pick_ready(1));
        assert!(!s.pick_ready(0));

        s.take(1).unwrap();
        assert_eq!(s.decide(Tick(126)), FeederAction::ShuttleStart);
        assert_eq!(s.check_status(Tick(247)), Some(0));
        assert_eq!(s.shuttles, 2);
    }

    #[test]
    fn take_from_wrong_slot_is_an_error() {
        let mut feeders = vec![shuttle()];
        assert!(matches!(feeders[0].take(1, Tick(0)), Err(StationError::NotReadyForPick { slot: 1, .. })));
    }

    #[test]
    fn start_slot_out_of_range() {
        let spec = ShuttleFeederSpec {
            name: "Shuttle".into(),
            slots: ["A".into(), "B".into()],
            start_slot: 2,
            shuttle_secs: 1.2,
        };
        assert!(matches!(
            ShuttleFeeder::from_spec(FeederId(0), &spec, &clock(), false),
            Err(StationError::Config { .. })
        ));
    }
}

// ── Robot ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod robot {
    use super::*;

    fn robot(feeders: &[Feeder]) -> Robot {
        Robot::from_spec(RobotId(0), &robot_spec(), feeders, &clock(), false).unwrap()
    }

    #[test]
    fn pick_inspect_place_in_order() {
        let mut feeders = vec![shuttle()];
        let mut r = robot(&feeders);

        // no place without a part, whatever the stop says
        assert_eq!(r.decide(Tick(0), &mut feeders, EMPTY).unwrap(), Some(ProgramKind::Pick));
        assert_eq!(r.current_kind(), Some(ProgramKind::Pick));
        assert_eq!(r.decide(Tick(1), &mut feeders, WAITING).unwrap(), None);

        assert_eq!(r.check_status(Tick(95)).unwrap(), None);
        assert_eq!(r.check_status(Tick(96)).unwrap(), Some(ProgramKind::Pick));
        assert!(r.part_present && !r.part_inspected);

        // inspect comes before place even with a pallet waiting
        assert_eq!(r.decide(Tick(96), &mut feeders, WAITING).unwrap(), Some(ProgramKind::Inspect));
        assert_eq!(r.check_status(Tick(197)).unwrap(), Some(ProgramKind::Inspect));
        assert!(r.ready_to_place());

        assert_eq!(r.decide(Tick(197), &mut feeders, EMPTY).unwrap(), None);
        assert_eq!(r.decide(Tick(198), &mut feeders, DONE).unwrap(), None);
        assert_eq!(r.decide(Tick(200), &mut feeders, WAITING).unwrap(), Some(ProgramKind::Place));

        assert_eq!(r.check_status(Tick(296)).unwrap(), Some(ProgramKind::Place));
        assert!(!r.part_present && !r.part_inspected);
        assert!(r.completion_pending());
        assert!(r.take_completion());
        assert!(!r.completion_pending());
    }

    #[test]
    fn picks_wait_for_the_source() {
        let mut feeders = vec![shuttle()];
        let mut r = robot(&feeders);
        feeders[0].take(0, Tick(0)).unwrap();
        assert_eq!(r.decide(Tick(0), &mut feeders, WAITING).unwrap(), None);
        refill(&mut feeders, 0);
        assert_eq!(r.decide(Tick(1), &mut feeders, WAITING).unwrap(), Some(ProgramKind::Pick));
    }

    #[test]
    fn cycle_sample_spans_place_start_to_next_inspected_part() {
        let mut feeders = vec![shuttle()];
        let mut r = robot(&feeders);
        r.part_present = true;
        r.part_inspected = true;

        r.decide(Tick(200), &mut feeders, WAITING).unwrap();
        r.check_status(Tick(296)).unwrap();
        assert!(r.cycle_samples.is_empty());

        refill(&mut feeders, 0);
        assert_eq!(r.decide(Tick(296), &mut feeders, EMPTY).unwrap(), Some(ProgramKind::Pick));
        r.check_status(Tick(392)).unwrap();
        // picked but not yet inspected: window still open
        assert!(r.cycle_samples.is_empty());
        r.decide(Tick(392), &mut feeders, EMPTY).unwrap();
        r.check_status(Tick(493)).unwrap();
        assert_eq!(r.cycle_samples, vec![293]);
    }

    #[test]
    fn no_place_while_completion_pending() {
        let mut feeders = vec![shuttle()];
        let mut r = robot(&feeders);
        r.part_present = true;
        r.part_inspected = true;
        r.decide(Tick(0), &mut feeders, WAITING).unwrap();
        r.check_status(Tick(96)).unwrap();

        r.part_present = true;
        r.part_inspected = true;
        assert_eq!(r.decide(Tick(96), &mut feeders, WAITING).unwrap(), None);
        assert!(r.take_completion());
        assert_eq!(r.decide(Tick(97), &mut feeders, WAITING).unwrap(), Some(ProgramKind::Place));
    }

    #[test]
    fn start_while_running_is_an_error() {
        let feeders = vec![shuttle()];
        let mut r = robot(&feeders);
        r.start_program(Tick(0), r.place).unwrap();
        let inspect = r.inspect.unwrap();
        assert!(matches!(r.start_program(Tick(1), inspect), Err(StationError::AlreadyInCycle { .. })));
    }

    #[test]
    fn start_unknown_program_is_an_error() {
        let feeders = vec![shuttle()];
        let mut r = robot(&feeders);
        assert!(matches!(r.start_program(Tick(0), ProgramId(9)), Err(StationError::UnknownProgram { .. })));
        assert!(!r.in_cycle());
    }

    #[test]
    fn without_inspect_pick_makes_part_placeable() {
        let mut feeders = vec![shuttle()];
        let mut spec = robot_spec();
        spec.inspect = None;
        let mut r = Robot::from_spec(RobotId(0), &spec, &feeders, &clock(), false).unwrap();
        r.part_present = true;
        r.decide(Tick(0), &mut feeders, WAITING).unwrap();
        r.check_status(Tick(96)).unwrap();
        r.take_completion();
        r.decide(Tick(96), &mut feeders, EMPTY).unwrap();
        r.check_status(Tick(192)).unwrap();
        assert!(r.ready_to_place());
        assert_eq!(r.cycle_samples, vec![192]);
    }

    #[test]
    fn pick_program_cannot_also_place() {
        let feeders = vec![shuttle()];
        let mut spec = robot_spec();
        spec.picks[0].program = "place".into();
        assert!(matches!(
            Robot::from_spec(RobotId(0), &spec, &feeders, &clock(), false),
            Err(StationError::ConflictingRoles { other: "place", .. })
        ));
    }

    #[test]
    fn unknown_feeder() {
        let feeders = vec![shuttle()];
        let mut spec = robot_spec();
        spec.picks[0].feeder = "Bowl".into();
        assert!(matches!(
            Robot::from_spec(RobotId(0), &spec, &feeders, &clock(), false),
            Err(StationError::UnknownReference { kind: "feeder", .. })
        ));
    }

    #[test]
    fn tray_sources_have_one_slot() {
        let feeders = vec![Feeder::Tray(tray("Tray", 1))];
        let mut spec = robot_spec();
        spec.picks = vec![PickSourceSpec::new("Tray", 1, "pick")];
        assert!(matches!(
            Robot::from_spec(RobotId(0), &spec, &feeders, &clock(), false),
            Err(StationError::Config { .. })
        ));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;
    use pl_core::SimRng;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn shuffle_never_exceeds_tray(seed in any::<u64>(), qty in 0u32..60, p in 0.0f64..=1.0) {
            let mut t = tray("L", 1);
            t.total_qty = qty;
            t.yield_prob = p;
            let mut rng = SimRng::new(seed);
            t.shuffle(Tick(0), &mut rng);
            prop_assert!(t.pick_qty <= t.total_qty);
        }

        #[test]
        fn feed_in_stays_in_range(seed in any::<u64>()) {
            let mut t = tray("L", 1);
            let mut rng = SimRng::new(seed);
            t.feed_in(Tick(0), &mut rng);
            prop_assert!((5..=10).contains(&t.total_qty));
        }
    }
}
