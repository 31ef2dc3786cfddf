//! The `Sim` struct and its tick loop.

use pl_core::{Position, RobotId, RunConfig, SimClock, SimRng, Tick, YieldSource};
use pl_ring::{Release, Ring};
use pl_station::{Feeder, Robot, StopView, VisionController};
use tracing::info;

use crate::{RunReport, SampleSeries, SimObserver, SimResult, TaktMeter};

/// The line simulation.
///
/// Each tick runs two passes over every entity:
///
/// 1. **Status**: stop timers advance and finished transits land; robots,
///    feeders and vision controllers resolve timers that have run out.
/// 2. **Decision**, in this order:
///    - robot completions are folded into their stops, dwell-driven stops
///      are evaluated, and the final position records takt;
///    - every stop that can release does so, all at the same tick;
///    - feeders start their next phase (contending for vision);
///    - robots pick, inspect or place against the post-release ring.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<Y: YieldSource = SimRng> {
    pub config: RunConfig,
    pub clock:  SimClock,
    pub ring:   Ring,

    pub robots:  Vec<Robot>,
    pub feeders: Vec<Feeder>,
    pub visions: Vec<VisionController>,

    /// Robots wired to each stop, indexed by `Position::index()`.
    pub wiring: Vec<Vec<RobotId>>,
    /// The stop each robot serves, indexed by `RobotId`.
    pub robot_stop: Vec<Position>,

    pub final_position: Position,
    pub takt: TaktMeter,
    pub releases: u64,

    /// The only source of randomness: tray-feeder shuffles and feed-ins.
    pub rng: Y,
}

impl<Y: YieldSource> Sim<Y> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick until simulated time exceeds the run
    /// length.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.end_tick();
        info!(
            stops = self.ring.len(),
            pallets = self.ring.pallets().len(),
            run_secs = self.config.run_secs,
            end_tick = end.0,
            "simulation running"
        );
        while self.clock.current_tick < end {
            self.tick(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(ticks = self.clock.current_tick.0, releases = self.releases, "simulation complete");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores the run
    /// length).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    /// Statistics gathered so far.
    pub fn report(&self) -> RunReport {
        RunReport {
            elapsed_secs: self.clock.elapsed_secs(),
            releases: self.releases,
            robots: self
                .robots
                .iter()
                .map(|r| SampleSeries::from_ticks(r.name.clone(), &r.cycle_samples, &self.clock))
                .collect(),
            takt: SampleSeries::from_ticks("Overall", self.takt.samples(), &self.clock),
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.status_pass(now)?;
        self.decision_pass(now, observer)?;
        observer.on_tick_end(now, &self.ring);
        self.clock.advance();
        Ok(())
    }

    /// Resolve every timer that has run out.  Starts nothing new except the
    /// shuffle that a finished feed-in rolls into.
    fn status_pass(&mut self, now: Tick) -> SimResult<()> {
        self.ring.advance_status(now)?;
        for robot in &mut self.robots {
            robot.check_status(now)?;
        }
        for feeder in &mut self.feeders {
            feeder.check_status(now, &mut self.rng);
        }
        for vision in &mut self.visions {
            vision.check_status(now);
        }
        Ok(())
    }

    fn decision_pass<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        // ── Completions and dwell ─────────────────────────────────────────
        for index in 0..self.ring.len() {
            let position = Position::from_index(index);
            let wired = &self.wiring[index];
            let external = if wired.is_empty() {
                None
            } else {
                Some(wired.iter().all(|r| self.robots[r.index()].completion_pending()))
            };
            if !self.ring.evaluate_release(position, external)? {
                continue;
            }
            for r in wired {
                self.robots[r.index()].take_completion();
            }
            if position == self.final_position {
                self.takt.record(now);
            }
        }

        // ── Releases, one timestamp for all ───────────────────────────────
        let ready: Vec<Position> = (0..self.ring.len())
            .map(Position::from_index)
            .filter(|&p| self.ring.can_release(p))
            .collect();
        for position in ready {
            let release: Release = self.ring.release(position, now)?;
            self.releases += 1;
            observer.on_release(&release);
        }

        // ── Station processes ─────────────────────────────────────────────
        for feeder in &mut self.feeders {
            feeder.decide(now, &mut self.visions, &mut self.rng)?;
        }
        for (robot, &position) in self.robots.iter_mut().zip(&self.robot_stop) {
            let stop = self.ring.stop(position)?;
            let view = StopView { occupied: stop.is_occupied(), complete: stop.process_complete };
            robot.decide(now, &mut self.feeders, view)?;
        }
        Ok(())
    }
}
