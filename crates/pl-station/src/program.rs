//! Per-robot program tables.

use pl_core::{ProgramId, SimClock};

use crate::{ProgramSpec, StationError, StationResult};

/// What a program does to the robot's part state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProgramKind {
    Pick,
    Inspect,
    Place,
}

impl ProgramKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgramKind::Pick    => "pick",
            ProgramKind::Inspect => "inspect",
            ProgramKind::Place   => "place",
        }
    }
}

impl std::fmt::Display for ProgramKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub name:  String,
    pub ticks: u64,
}

/// Static name → duration table, indexed by `ProgramId`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramTable {
    programs: Vec<Program>,
}

impl ProgramTable {
    /// Build from specs, rejecting duplicate names and non-positive times.
    pub fn from_specs(owner: &str, specs: &[ProgramSpec], clock: &SimClock) -> StationResult<Self> {
        crate::config::ensure_unique("program", specs.iter().map(|s| s.name.as_str()))?;
        let programs = specs
            .iter()
            .map(|s| {
                let ticks = clock.positive_ticks(&format!("{owner} program {:?}", s.name), s.secs)?;
                Ok(Program { name: s.name.clone(), ticks })
            })
            .collect::<StationResult<Vec<_>>>()?;
        Ok(Self { programs })
    }

    pub fn lookup(&self, owner: &str, name: &str) -> StationResult<ProgramId> {
        self.programs
            .iter()
            .position(|p| p.name == name)
            .map(|i| ProgramId(i as u16))
            .ok_or_else(|| StationError::UnknownProgram { owner: owner.to_owned(), program: name.to_owned() })
    }

    /// The program behind `id`, or `UnknownProgram` if this table has no such slot.
    pub fn get(&self, owner: &str, id: ProgramId) -> StationResult<&Program> {
        self.programs
            .get(id.index())
            .ok_or_else(|| StationError::UnknownProgram { owner: owner.to_owned(), program: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
