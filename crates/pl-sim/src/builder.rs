//! Builder that turns a [`LineConfig`] into a ready-to-run [`Sim`].

use pl_core::{FeederId, Position, RobotId, SimRng, VisionId, YieldSource};
use pl_ring::{PalletStop, Ring};
use pl_station::{
    Feeder, Robot, ShuttleFeeder, StationError, TrayFeeder, VisionController, ensure_unique,
};
use tracing::debug;

use crate::{LineConfig, Sim, SimError, SimResult, TaktMeter};

/// Resolves names, converts seconds to ticks, and checks the whole line
/// before the first tick runs.
///
/// # Example
///
/// ```rust,ignore
/// let layout = LineLayout::new(stops)?;
/// let mut sim = SimBuilder::new(LineConfig::new(RunConfig::default(), layout, 20))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// println!("{}", sim.report());
/// ```
pub struct SimBuilder {
    config: LineConfig,
}

impl SimBuilder {
    pub fn new(config: LineConfig) -> Self {
        Self { config }
    }

    /// Build with a [`SimRng`] seeded from `config.run.seed`.
    pub fn build(self) -> SimResult<Sim<SimRng>> {
        let rng = SimRng::new(self.config.run.seed);
        self.build_with(rng)
    }

    /// Build with an explicit yield source.
    pub fn build_with<Y: YieldSource>(self, rng: Y) -> SimResult<Sim<Y>> {
        let config = self.config;
        config.run.validate()?;
        let clock = config.run.make_clock();
        let trace = &config.trace;

        // ── Ring ──────────────────────────────────────────────────────────
        let stops = config
            .layout
            .stops()
            .iter()
            .map(|spec| {
                let transit = clock.non_negative_ticks(&format!("{} transit", spec.station_id), spec.transit_secs)?;
                let cycle = clock.non_negative_ticks(&format!("{} cycle", spec.station_id), spec.cycle_secs)?;
                let mut stop = PalletStop::from_spec(spec, transit, cycle);
                stop.traced = trace.position(spec.position());
                Ok(stop)
            })
            .collect::<SimResult<Vec<_>>>()?;
        let clearing = clock.non_negative_ticks("pallet clearing time", config.run.clearing_secs)?;
        if config.pallet_count == 0 || config.pallet_count > stops.len() {
            return Err(SimError::Config(format!(
                "pallet count {} must be between 1 and the {} ring positions",
                config.pallet_count,
                stops.len()
            )));
        }
        let ring = Ring::new(stops, config.pallet_count, clearing)?;

        // ── Vision controllers ────────────────────────────────────────────
        ensure_unique("vision controller", config.visions.iter().map(|v| v.name.as_str()))?;
        let visions = config
            .visions
            .iter()
            .enumerate()
            .map(|(i, spec)| VisionController::from_spec(VisionId(i as u16), spec, &clock, trace.process(&spec.name)))
            .collect::<Result<Vec<_>, _>>()?;

        // ── Feeders: tray feeders first, then shuttles ────────────────────
        ensure_unique(
            "feeder",
            config
                .tray_feeders
                .iter()
                .map(|f| f.name.as_str())
                .chain(config.shuttle_feeders.iter().map(|f| f.name.as_str())),
        )?;
        let mut feeders = Vec::with_capacity(config.tray_feeders.len() + config.shuttle_feeders.len());
        for spec in &config.tray_feeders {
            let vision = visions
                .iter()
                .position(|v| v.name == spec.vision)
                .ok_or_else(|| StationError::UnknownReference {
                    owner: spec.name.clone(),
                    kind:  "vision controller",
                    name:  spec.vision.clone(),
                })?;
            let id = FeederId(feeders.len() as u16);
            let tray = TrayFeeder::from_spec(id, spec, VisionId(vision as u16), &clock, trace.process(&spec.name))?;
            feeders.push(Feeder::Tray(tray));
        }
        for spec in &config.shuttle_feeders {
            let id = FeederId(feeders.len() as u16);
            feeders.push(Feeder::Shuttle(ShuttleFeeder::from_spec(id, spec, &clock, trace.process(&spec.name))?));
        }

        // ── Robots ────────────────────────────────────────────────────────
        ensure_unique("robot", config.robots.iter().map(|r| r.name.as_str()))?;
        let robots = config
            .robots
            .iter()
            .enumerate()
            .map(|(i, spec)| Robot::from_spec(RobotId(i as u16), spec, &feeders, &clock, trace.process(&spec.name)))
            .collect::<Result<Vec<_>, _>>()?;

        // ── Wiring ────────────────────────────────────────────────────────
        let len = ring.len();
        let mut wiring: Vec<Vec<RobotId>> = vec![Vec::new(); len];
        let mut robot_stop: Vec<Option<Position>> = vec![None; robots.len()];
        for entry in &config.wiring {
            let position = Position(entry.position);
            if entry.position == 0 || position.index() >= len {
                return Err(SimError::Config(format!("wiring names unknown position {}", entry.position)));
            }
            if entry.robots.is_empty() {
                return Err(SimError::Config(format!("wiring for {position} names no robots")));
            }
            if !wiring[position.index()].is_empty() {
                return Err(SimError::Config(format!("{position} is wired twice")));
            }
            for name in &entry.robots {
                let index = robots
                    .iter()
                    .position(|r| &r.name == name)
                    .ok_or_else(|| SimError::Config(format!("wiring for {position} names unknown robot {name:?}")))?;
                if let Some(other) = robot_stop[index].replace(position) {
                    return Err(SimError::Config(format!("robot {name:?} is wired to both {other} and {position}")));
                }
                wiring[position.index()].push(RobotId(index as u16));
            }
        }
        let robot_stop = robot_stop
            .into_iter()
            .zip(&robots)
            .map(|(stop, robot)| {
                stop.ok_or_else(|| SimError::Config(format!("robot {:?} is not wired to any stop", robot.name)))
            })
            .collect::<SimResult<Vec<_>>>()?;

        let final_position = match config.final_position {
            None => config.layout.last_position(),
            Some(p) if p >= 1 && usize::from(p) <= len => Position(p),
            Some(p) => return Err(SimError::Config(format!("final position {p} is not on the ring"))),
        };

        debug!(
            stops = len,
            pallets = config.pallet_count,
            robots = robots.len(),
            feeders = feeders.len(),
            visions = visions.len(),
            clearing_ticks = clearing,
            "line resolved"
        );

        Ok(Sim {
            clock,
            config: config.run,
            ring,
            robots,
            feeders,
            visions,
            wiring,
            robot_stop,
            final_position,
            takt: TaktMeter::new(),
            releases: 0,
            rng,
        })
    }
}
