//! Pick / inspect / place robot.
//!
//! # Cycle
//!
//! ```text
//! idle ─pick─▶ part present ─inspect─▶ part inspected ─place─▶ complete
//!   ▲                                                              │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The inspect step is optional per robot.  The gate is strict: no inspect
//! without a finished pick, no place without a finished inspect (or pick,
//! for robots without one).
//!
//! # Cycle-time samples
//!
//! Starting a place opens a window; the next time the robot holds a
//! placeable part (inspect finished, or pick finished for robots without an
//! inspect program) the window closes and its length is recorded.

use pl_core::{FeederId, ProgramId, RobotId, SimClock, Tick};
use tracing::info;

use crate::{
    Completion, Feeder, ProgramKind, ProgramTable, RobotSpec, StationError, StationResult,
};

/// A resolved pick source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PickSource {
    pub feeder:  FeederId,
    pub slot:    usize,
    pub program: ProgramId,
}

/// The only view of the ring a robot gets: its own stop's occupancy and
/// completion latch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StopView {
    pub occupied: bool,
    pub complete: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Running {
    program: ProgramId,
    start:   Tick,
    ticks:   u64,
}

#[derive(Clone, Debug)]
pub struct Robot {
    pub id:   RobotId,
    pub name: String,

    pub programs: ProgramTable,
    pub picks:    Vec<PickSource>,
    pub inspect:  Option<ProgramId>,
    pub place:    ProgramId,

    running: Option<Running>,
    pub part_present:   bool,
    pub part_inspected: bool,
    completion: Completion,

    window_start: Option<Tick>,
    /// Completed cycle times, in ticks.
    pub cycle_samples: Vec<u64>,

    pub traced: bool,
}

impl Robot {
    /// Resolve `spec` against the feeder bank.
    pub fn from_spec(
        id:      RobotId,
        spec:    &RobotSpec,
        feeders: &[Feeder],
        clock:   &SimClock,
        traced:  bool,
    ) -> StationResult<Self> {
        let owner = spec.name.as_str();
        let programs = ProgramTable::from_specs(owner, &spec.programs, clock)?;
        let place = programs.lookup(owner, &spec.place)?;
        let inspect = spec
            .inspect
            .as_deref()
            .map(|name| programs.lookup(owner, name))
            .transpose()?;
        if inspect == Some(place) {
            return Err(StationError::Config {
                owner:  owner.to_owned(),
                detail: format!("program {:?} cannot both inspect and place", spec.place),
            });
        }
        if spec.picks.is_empty() {
            return Err(StationError::Config { owner: owner.to_owned(), detail: "no pick sources".into() });
        }

        let picks = spec
            .picks
            .iter()
            .map(|src| {
                let index = feeders
                    .iter()
                    .position(|f| f.name() == src.feeder)
                    .ok_or_else(|| StationError::UnknownReference {
                        owner: owner.to_owned(),
                        kind:  "feeder",
                        name:  src.feeder.clone(),
                    })?;
                let max_slot = if feeders[index].is_shuttle() { 1 } else { 0 };
                if src.slot > max_slot {
                    return Err(StationError::Config {
                        owner:  owner.to_owned(),
                        detail: format!("feeder {:?} has no slot {}", src.feeder, src.slot),
                    });
                }
                let program = programs.lookup(owner, &src.program)?;
                if program == place {
                    return Err(StationError::ConflictingRoles {
                        owner:   owner.to_owned(),
                        program: src.program.clone(),
                        other:   "place",
                    });
                }
                if Some(program) == inspect {
                    return Err(StationError::ConflictingRoles {
                        owner:   owner.to_owned(),
                        program: src.program.clone(),
                        other:   "inspect",
                    });
                }
                Ok(PickSource { feeder: FeederId(index as u16), slot: src.slot, program })
            })
            .collect::<StationResult<Vec<_>>>()?;

        Ok(Self {
            id,
            name: spec.name.clone(),
            programs,
            picks,
            inspect,
            place,
            running: None,
            part_present: false,
            part_inspected: false,
            completion: Completion::new(),
            window_start: None,
            cycle_samples: Vec::new(),
            traced,
        })
    }

    // ── State ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn in_cycle(&self) -> bool {
        self.running.is_some()
    }

    pub fn current_program(&self) -> Option<ProgramId> {
        self.running.map(|r| r.program)
    }

    /// What the running program does, if any.
    pub fn current_kind(&self) -> Option<ProgramKind> {
        self.running.map(|r| self.kind_of(r.program))
    }

    pub fn program_start(&self) -> Option<Tick> {
        self.running.map(|r| r.start)
    }

    pub fn kind_of(&self, program: ProgramId) -> ProgramKind {
        if program == self.place {
            ProgramKind::Place
        } else if Some(program) == self.inspect {
            ProgramKind::Inspect
        } else {
            ProgramKind::Pick
        }
    }

    /// Holding a part that may go onto the pallet.
    #[inline]
    pub fn ready_to_place(&self) -> bool {
        if self.inspect.is_some() { self.part_inspected } else { self.part_present }
    }

    #[inline]
    pub fn completion_pending(&self) -> bool {
        self.completion.is_pending()
    }

    /// Consume the completion event.  Called by the ring driver only.
    #[inline]
    pub fn take_completion(&mut self) -> bool {
        self.completion.take()
    }

    // ── Programs ──────────────────────────────────────────────────────────

    /// Start `program`.  Starting the place program opens a cycle window.
    pub fn start_program(&mut self, now: Tick, program: ProgramId) -> StationResult<()> {
        let requested = self.programs.get(&self.name, program)?;
        if let Some(running) = self.running {
            return Err(StationError::AlreadyInCycle {
                process:   self.name.clone(),
                requested: requested.name.clone(),
                running:   self.programs.get(&self.name, running.program)?.name.clone(),
            });
        }
        let ticks = requested.ticks;
        if self.traced {
            info!(tick = now.0, robot = %self.name, program = %requested.name, "program start");
        }
        self.running = Some(Running { program, start: now, ticks });
        if program == self.place {
            self.window_start = Some(now);
        }
        Ok(())
    }

    /// Status pass: finish the running program if it has run out.
    pub fn check_status(&mut self, now: Tick) -> StationResult<Option<ProgramKind>> {
        let Some(running) = self.running else {
            return Ok(None);
        };
        if !now.is_past(running.start, running.ticks) {
            return Ok(None);
        }
        self.running = None;

        let kind = self.kind_of(running.program);
        match kind {
            ProgramKind::Pick => {
                self.part_present = true;
                if self.inspect.is_none() {
                    self.close_window(now);
                }
            }
            ProgramKind::Inspect => {
                self.part_inspected = true;
                self.close_window(now);
            }
            ProgramKind::Place => {
                self.part_present = false;
                self.part_inspected = false;
                self.completion.post(&self.name)?;
            }
        }
        Ok(Some(kind))
    }

    fn close_window(&mut self, now: Tick) {
        if let Some(start) = self.window_start.take() {
            self.cycle_samples.push(now - start);
        }
    }

    // ── Decision pass ─────────────────────────────────────────────────────

    /// Pick if empty-handed and a source is ready; inspect a picked part;
    /// place an inspected part once the stop holds a pallet that is not yet
    /// complete and the previous completion has been taken.
    pub fn decide(&mut self, now: Tick, feeders: &mut [Feeder], stop: StopView) -> StationResult<Option<ProgramKind>> {
        if self.in_cycle() {
            return Ok(None);
        }

        if !self.part_present {
            let ready = self
                .picks
                .iter()
                .copied()
                .find(|src| feeders[src.feeder.index()].pick_ready(src.slot));
            let Some(src) = ready else {
                return Ok(None);
            };
            feeders[src.feeder.index()].take(src.slot, now)?;
            self.start_program(now, src.program)?;
            return Ok(Some(ProgramKind::Pick));
        }

        if let Some(inspect) = self.inspect {
            if !self.part_inspected {
                self.start_program(now, inspect)?;
                return Ok(Some(ProgramKind::Inspect));
            }
        }

        if self.ready_to_place() && stop.occupied && !stop.complete && !self.completion.is_pending() {
            self.start_program(now, self.place)?;
            return Ok(Some(ProgramKind::Place));
        }
        Ok(None)
    }
}
