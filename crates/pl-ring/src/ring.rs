//! The `Ring` — owns every stop and pallet and applies the release rules.

use pl_core::{PalletId, Position, Tick};
use tracing::info;

use crate::{Pallet, PalletState, PalletStop, RingError, RingResult};

/// A pallet that finished its transit during a status pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub pallet:   PalletId,
    pub position: Position,
}

/// A pallet that left its stop during a decision pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
    pub pallet: PalletId,
    pub from:   Position,
    pub to:     Position,
    pub tick:   Tick,
}

/// The closed loop of pallet stops and the fixed pallet population.
///
/// `stops[i]` is ordinal `i + 1`; `pallets[i]` is `PalletId(i)`.  Neither
/// arena grows or shrinks after construction.
#[derive(Debug, Clone)]
pub struct Ring {
    stops:          Vec<PalletStop>,
    pallets:        Vec<Pallet>,
    clearing_ticks: u64,
}

impl Ring {
    /// Build a ring and seat `pallet_count` pallets, pallet `i` at ordinal
    /// `i + 1`.
    pub fn new(stops: Vec<PalletStop>, pallet_count: usize, clearing_ticks: u64) -> RingResult<Self> {
        if pallet_count == 0 || pallet_count > stops.len() {
            return Err(RingError::PalletCount { count: pallet_count, stops: stops.len() });
        }
        for (index, stop) in stops.iter().enumerate() {
            if stop.position != Position::from_index(index) {
                return Err(RingError::Misordered { index, found: stop.position });
            }
        }

        let mut ring = Self { stops, pallets: Vec::with_capacity(pallet_count), clearing_ticks };
        for i in 0..pallet_count {
            let id = PalletId(i as u32);
            let at = Position::from_index(i);
            ring.stops[i].occupy(id)?;
            ring.pallets.push(Pallet::resident(id, at));
        }
        Ok(ring)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[PalletStop] {
        &self.stops
    }

    pub fn pallets(&self) -> &[Pallet] {
        &self.pallets
    }

    pub fn clearing_ticks(&self) -> u64 {
        self.clearing_ticks
    }

    pub fn stop(&self, position: Position) -> RingResult<&PalletStop> {
        let len = self.stops.len();
        position
            .0
            .checked_sub(1)
            .and_then(|i| self.stops.get(i as usize))
            .ok_or(RingError::UnknownPosition { position, len })
    }

    pub fn stop_mut(&mut self, position: Position) -> RingResult<&mut PalletStop> {
        let len = self.stops.len();
        position
            .0
            .checked_sub(1)
            .and_then(|i| self.stops.get_mut(i as usize))
            .ok_or(RingError::UnknownPosition { position, len })
    }

    pub fn pallet(&self, id: PalletId) -> Option<&Pallet> {
        self.pallets.get(id.index())
    }

    /// The stop downstream of `position`.
    #[inline]
    pub fn downstream(&self, position: Position) -> Position {
        position.next(self.stops.len())
    }

    pub fn resident_count(&self) -> usize {
        self.pallets.iter().filter(|p| !p.in_transit()).count()
    }

    pub fn in_transit_count(&self) -> usize {
        self.pallets.iter().filter(|p| p.in_transit()).count()
    }

    // ── Status pass ───────────────────────────────────────────────────────

    /// Advance every stop by one tick, then land every pallet whose transit
    /// has run out.
    ///
    /// Transit time is read from the **destination** stop's
    /// `upstream_transit`.
    pub fn advance_status(&mut self, now: Tick) -> RingResult<Vec<Arrival>> {
        for stop in &mut self.stops {
            stop.check_status();
        }

        let mut arrivals = Vec::new();
        for pallet in &mut self.pallets {
            let PalletState::InTransit { to, since } = pallet.state else {
                continue;
            };
            let stop = &mut self.stops[to.index()];
            if now < since + stop.upstream_transit {
                continue;
            }
            stop.occupy(pallet.id)?;
            pallet.arrive();
            if stop.traced {
                info!(tick = now.0, pallet = pallet.id.0, station = %stop.station_id, "pallet arrived");
            }
            arrivals.push(Arrival { pallet: pallet.id, position: to });
        }
        Ok(arrivals)
    }

    // ── Decision pass ─────────────────────────────────────────────────────

    /// Latch `process_complete` on `position` if it has become eligible.
    ///
    /// `external` carries the verdict of the station process wired to the
    /// stop; `None` means no process is attached and the stop completes once
    /// its dwell strictly exceeds its cycle time.  Returns `true` only when
    /// the latch is newly set, so repeated calls are idempotent.
    pub fn evaluate_release(&mut self, position: Position, external: Option<bool>) -> RingResult<bool> {
        let stop = self.stop_mut(position)?;
        if stop.process_complete {
            return Ok(false);
        }
        let eligible = match external {
            Some(done) => done,
            None => stop.is_occupied() && stop.dwell > stop.cycle_ticks,
        };
        if !eligible {
            return Ok(false);
        }
        stop.latch_complete()
    }

    /// `true` if `position` is complete and its downstream neighbour has sat
    /// empty for strictly longer than the clearing time.
    pub fn can_release(&self, position: Position) -> bool {
        let Ok(stop) = self.stop(position) else {
            return false;
        };
        let downstream = &self.stops[self.downstream(position).index()];
        stop.process_complete
            && stop.is_occupied()
            && !downstream.is_occupied()
            && downstream.empty_for > self.clearing_ticks
    }

    /// Send the pallet at `position` downstream, starting its transit at
    /// `now`.
    pub fn release(&mut self, position: Position, now: Tick) -> RingResult<Release> {
        let len = self.stops.len();
        let clearing = self.clearing_ticks;
        let down = self.downstream(position);
        let empty_for = self.stops[down.index()].empty_for;
        let downstream_free = !self.stops[down.index()].is_occupied() && empty_for > clearing;

        let stop = self.stop_mut(position)?;
        if !stop.is_occupied() {
            return Err(RingError::StopEmpty(position));
        }
        if !stop.process_complete {
            return Err(RingError::NotComplete(position));
        }
        if !downstream_free {
            return Err(RingError::Interlock { position, downstream: down, empty_for, clearing });
        }

        let pallet = stop.vacate()?;
        if stop.traced {
            info!(tick = now.0, pallet = pallet.0, station = %stop.station_id, "releasing pallet");
        }
        let to = self.pallets[pallet.index()].release(now, len)?;
        Ok(Release { pallet, from: position, to, tick: now })
    }

    // ── Consistency ───────────────────────────────────────────────────────

    /// Cross-check stops against pallets: every resident pallet is recorded
    /// by exactly the stop it claims, no stop holds a pallet in transit, and
    /// no empty stop is latched complete.
    pub fn check_invariants(&self) -> RingResult<()> {
        let mut seen = vec![false; self.pallets.len()];
        for stop in &self.stops {
            match stop.current_pallet {
                None => {
                    if stop.process_complete {
                        return Err(RingError::Inconsistent(format!(
                            "{} is complete while empty",
                            stop.position
                        )));
                    }
                }
                Some(id) => {
                    let pallet = self.pallets.get(id.index()).ok_or_else(|| {
                        RingError::Inconsistent(format!("{} holds unknown {id}", stop.position))
                    })?;
                    if pallet.current_position() != Some(stop.position) {
                        return Err(RingError::Inconsistent(format!(
                            "{} holds {id} but the pallet is {:?}",
                            stop.position, pallet.state
                        )));
                    }
                    if std::mem::replace(&mut seen[id.index()], true) {
                        return Err(RingError::Inconsistent(format!("{id} held by two stops")));
                    }
                }
            }
        }
        for pallet in &self.pallets {
            if !pallet.in_transit() && !seen[pallet.id.index()] {
                return Err(RingError::Inconsistent(format!(
                    "{} is resident but no stop holds it",
                    pallet.id
                )));
            }
        }
        Ok(())
    }
}
