//! Single-slot vision controller shared by the feeders of one cell.

use pl_core::{CameraId, SimClock, Tick, VisionId};
use tracing::info;

use crate::{StationError, StationResult, VisionSpec};

/// Mutual-exclusion resource: at most one camera inspects at a time.
///
/// Contention is resolved by the callers polling [`is_idle`][Self::is_idle]
/// on later ticks; a request that reaches a busy controller is a defect.
#[derive(Clone, Debug)]
pub struct VisionController {
    pub id:   VisionId,
    pub name: String,
    pub inspect_ticks: u64,
    /// Active camera and inspection start, while in cycle.
    active: Option<(CameraId, Tick)>,
    /// Inspections started over the run.
    pub inspections: u64,
    pub traced: bool,
}

impl VisionController {
    pub fn new(id: VisionId, name: impl Into<String>, inspect_ticks: u64) -> Self {
        Self { id, name: name.into(), inspect_ticks, active: None, inspections: 0, traced: false }
    }

    pub fn from_spec(id: VisionId, spec: &VisionSpec, clock: &SimClock, traced: bool) -> StationResult<Self> {
        let ticks = clock.positive_ticks(&format!("{} inspection", spec.name), spec.inspect_secs)?;
        Ok(Self { traced, ..Self::new(id, spec.name.clone(), ticks) })
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    #[inline]
    pub fn in_cycle(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_camera(&self) -> Option<CameraId> {
        self.active.map(|(camera, _)| camera)
    }

    pub fn inspection_start(&self) -> Option<Tick> {
        self.active.map(|(_, start)| start)
    }

    /// Occupy the controller for one inspection on `camera`.
    pub fn start_inspection(&mut self, now: Tick, camera: CameraId) -> StationResult<()> {
        if let Some((active, _)) = self.active {
            return Err(StationError::VisionBusy { vision: self.name.clone(), active, requested: camera });
        }
        self.active = Some((camera, now));
        self.inspections += 1;
        if self.traced {
            info!(tick = now.0, vision = %self.name, camera = camera.0, "inspecting");
        }
        Ok(())
    }

    /// Status pass: release the controller once the inspection has run out.
    /// Returns the camera whose inspection finished.
    pub fn check_status(&mut self, now: Tick) -> Option<CameraId> {
        let (camera, start) = self.active?;
        if !now.is_past(start, self.inspect_ticks) {
            return None;
        }
        self.active = None;
        Some(camera)
    }
}
