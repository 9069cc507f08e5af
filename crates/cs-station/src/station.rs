//! `Station` — the controller that ties slots, queue and reserves together.
//!
//! # Ownership
//!
//! A station owns every vehicle currently at it, in a roster keyed by id.
//! The slot pool and the wait queue hold only ids.  Vehicles enter through
//! [`Station::request`] (by value) and leave inside a [`Departure`] when they
//! finish, time out, or the station shuts down.  A rejected vehicle is handed
//! straight back in [`RequestOutcome::Rejected`].
//!
//! # Invariants
//!
//! After every public mutating call:
//!
//! - every roster vehicle is in exactly one of {slot pool, wait queue};
//! - no kind has more occupants than slots;
//! - every priority queue entry precedes every non-priority entry;
//! - no reserve is negative.
//!
//! Debug builds verify these with [`Station::check_invariants`] after each
//! `request`, `tick` and `shutdown`.

use cs_core::{FuelKind, GeoPoint, PerKind, SlotIndex, StationId, Tick, VehicleId};
use cs_vehicle::{DepartureReason, Vehicle, VehicleState};

use crate::{
    ChargeOutcome, ConstructionError, Departure, IdMap, QueueEntry, RejectReason, RequestOutcome,
    ResourceAccount, SlotPool, StationConfig, StationError, StationResult, TickReport, WaitQueue,
};

#[derive(Debug)]
pub struct Station {
    id:           StationId,
    location:     GeoPoint,
    slots:        SlotPool,
    queue:        WaitQueue,
    accounts:     PerKind<ResourceAccount>,
    roster:       IdMap<VehicleId, Vehicle>,
    wait_ceiling: Option<u64>,
    last_tick:    Option<Tick>,
}

impl Station {
    /// Validate `config` and build an idle station.
    pub fn new(config: StationConfig) -> Result<Self, ConstructionError> {
        config.validate()?;

        let accounts = PerKind::from_fn(|kind| {
            let fuel = &config.fuels[kind];
            ResourceAccount::new(kind, fuel.reserve, fuel.output_per_tick, fuel.replenish_per_tick)
        });
        let station = Self {
            id:           config.id,
            location:     config.location,
            slots:        SlotPool::new(config.slot_counts()),
            queue:        WaitQueue::new(),
            accounts,
            roster:       IdMap::default(),
            wait_ceiling: config.wait_ceiling,
            last_tick:    None,
        };

        tracing::debug!(
            station = %station.id,
            gas_slots = station.slots.capacity(FuelKind::Gas),
            electric_slots = station.slots.capacity(FuelKind::Electric),
            "station built"
        );
        Ok(station)
    }

    // ── Arrival ───────────────────────────────────────────────────────────

    /// Admit `vehicle` at `now`.
    ///
    /// Takes a free slot of the vehicle's kind if there is one, otherwise
    /// joins the wait queue.  Priority affects only queue order: a priority
    /// vehicle never displaces a vehicle that already holds a slot.
    pub fn request(&mut self, mut vehicle: Vehicle, now: Tick) -> RequestOutcome {
        let id = vehicle.id();
        let kind = vehicle.kind();

        if self.roster.contains_key(&id) {
            return self.reject(vehicle, RejectReason::Duplicate);
        }
        if self.slots.capacity(kind) == 0 {
            return self.reject(vehicle, RejectReason::UnsupportedFuel);
        }
        if vehicle.is_full() {
            return self.reject(vehicle, RejectReason::AlreadyFull);
        }

        let outcome = match self.slots.try_acquire(&vehicle) {
            Some(handle) => {
                vehicle.mark_charging(self.id);
                tracing::debug!(station = %self.id, vehicle = %id, slot = %handle, %now, "accepted");
                RequestOutcome::Accepted(handle)
            }
            None => match self.queue.enqueue(&vehicle, now) {
                Some(position) => {
                    vehicle.mark_waiting(self.id, now);
                    tracing::debug!(station = %self.id, vehicle = %id, position, %now, "queued");
                    RequestOutcome::Queued { position }
                }
                // Unreachable while the roster check above holds.
                None => return self.reject(vehicle, RejectReason::Duplicate),
            },
        };
        self.roster.insert(id, vehicle);
        self.debug_check();
        outcome
    }

    fn reject(&self, vehicle: Vehicle, reason: RejectReason) -> RequestOutcome {
        tracing::debug!(station = %self.id, vehicle = %vehicle.id(), %reason, "rejected");
        RequestOutcome::Rejected(vehicle, reason)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the station to `now`: evict, promote, charge, replenish.
    ///
    /// `now` must be later than the previous tick.  A repeated or earlier
    /// tick changes nothing and returns a report with `applied == false`, so
    /// no vehicle is ever charged twice for the same tick.
    pub fn tick(&mut self, now: Tick) -> TickReport {
        if self.last_tick.is_some_and(|last| now <= last) {
            tracing::warn!(station = %self.id, %now, last = ?self.last_tick, "tick did not advance; ignored");
            return TickReport::skipped(now);
        }
        self.last_tick = Some(now);

        let mut report = TickReport::new(now);
        self.evict(now, &mut report);
        self.promote(&mut report);
        self.charge(now, &mut report);
        for kind in FuelKind::ALL {
            self.accounts[kind].replenish();
        }

        if !report.is_quiet() {
            tracing::trace!(
                station = %self.id,
                %now,
                evicted = report.evicted.len(),
                promoted = report.promoted.len(),
                completed = report.completed.len(),
                "tick"
            );
        }
        self.debug_check();
        report
    }

    /// ① Queue entries past their limit leave with `Timeout`.
    fn evict(&mut self, now: Tick, report: &mut TickReport) {
        for entry in self.queue.evict_stale(now, self.wait_ceiling) {
            let waited = entry.waited(now);
            if let Some(departure) = self.depart(entry.vehicle, DepartureReason::Timeout, now) {
                tracing::info!(station = %self.id, vehicle = %entry.vehicle, waited, "wait limit exceeded");
                report.evicted.push(departure);
            }
        }
    }

    /// ② Each free slot takes the next queued vehicle of its kind.
    ///
    /// A promoted vehicle starts charging on the next tick.
    fn promote(&mut self, report: &mut TickReport) {
        for kind in FuelKind::ALL {
            let free = self.slots.free_count(kind);
            if free == 0 {
                continue;
            }

            let mut failed: Vec<QueueEntry> = Vec::new();
            for entry in self.queue.dequeue_kind_up_to(kind, free) {
                let Some(vehicle) = self.roster.get_mut(&entry.vehicle) else {
                    tracing::error!(station = %self.id, vehicle = %entry.vehicle, "queued vehicle missing from roster");
                    continue;
                };
                match self.slots.try_acquire(vehicle) {
                    Some(handle) => {
                        vehicle.mark_charging(self.id);
                        tracing::debug!(station = %self.id, vehicle = %entry.vehicle, slot = %handle, "promoted");
                        report.promoted.push(entry.vehicle);
                    }
                    None => failed.push(entry),
                }
            }
            // Restore back to front so the failed entries keep their order.
            for entry in failed.into_iter().rev() {
                self.queue.restore(entry);
            }
        }
    }

    /// ③ Every occupant not promoted this tick draws from its reserve.
    fn charge(&mut self, now: Tick, report: &mut TickReport) {
        for (handle, id) in self.slots.occupied() {
            if report.promoted.contains(&id) {
                continue;
            }
            let Some(vehicle) = self.roster.get_mut(&id) else {
                tracing::error!(station = %self.id, vehicle = %id, slot = %handle, "occupant missing from roster");
                continue;
            };

            match self.accounts[handle.kind].charge_tick(vehicle) {
                ChargeOutcome::Transferred(amount) => report.dispensed[handle.kind] += amount,
                ChargeOutcome::Exhausted => {
                    if !report.exhausted.contains(&handle.kind) {
                        tracing::warn!(station = %self.id, kind = %handle.kind, %now, "reserve exhausted");
                        report.exhausted.push(handle.kind);
                    }
                }
                ChargeOutcome::AlreadyFull | ChargeOutcome::NoOutput => {}
            }

            if vehicle.is_full() {
                if let Some(departure) = self.depart(id, DepartureReason::Full, now) {
                    tracing::debug!(station = %self.id, vehicle = %id, slot = %handle, "charging complete");
                    report.completed.push(departure);
                }
            }
        }
    }

    /// Remove `id` from the roster and whichever structure holds it.
    fn depart(&mut self, id: VehicleId, reason: DepartureReason, at: Tick) -> Option<Departure> {
        self.slots.release(id);
        let mut vehicle = self.roster.remove(&id)?;
        vehicle.depart(reason);
        Some(Departure { vehicle, reason, at })
    }

    // ── Shutdown ──────────────────────────────────────────────────────────

    /// Send every vehicle away with `Shutdown`: the queue in order first,
    /// then occupants by slot.  The station stays usable afterwards.
    pub fn shutdown(&mut self, now: Tick) -> Vec<Departure> {
        let mut departures = Vec::with_capacity(self.roster.len());
        for entry in self.queue.dequeue_up_to(self.queue.len()) {
            departures.extend(self.depart(entry.vehicle, DepartureReason::Shutdown, now));
        }
        for (_, id) in self.slots.occupied() {
            departures.extend(self.depart(id, DepartureReason::Shutdown, now));
        }
        if !departures.is_empty() {
            tracing::info!(station = %self.id, %now, sent_away = departures.len(), "station shut down");
        }
        self.debug_check();
        departures
    }

    // ── Reserve management ────────────────────────────────────────────────

    /// Overwrite the reserve of `kind`.  Kinds without slots must stay at 0.
    pub fn set_reserve(&mut self, kind: FuelKind, value: f64) -> StationResult<()> {
        if self.slots.capacity(kind) == 0 && value != 0.0 {
            return Err(StationError::UnsupportedFuel(kind));
        }
        self.accounts[kind].set_reserve(value)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> StationId {
        self.id
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    #[inline]
    pub fn wait_ceiling(&self) -> Option<u64> {
        self.wait_ceiling
    }

    #[inline]
    pub fn last_tick(&self) -> Option<Tick> {
        self.last_tick
    }

    #[inline]
    pub fn free_slots(&self, kind: FuelKind) -> usize {
        self.slots.free_count(kind)
    }

    #[inline]
    pub fn slot_count(&self, kind: FuelKind) -> usize {
        self.slots.capacity(kind)
    }

    #[inline]
    pub fn charging_count(&self, kind: FuelKind) -> usize {
        self.slots.occupied_count(kind)
    }

    #[inline]
    pub fn queue_length(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn reserve_level(&self, kind: FuelKind) -> f64 {
        self.accounts[kind].reserve()
    }

    #[inline]
    pub fn account(&self, kind: FuelKind) -> &ResourceAccount {
        &self.accounts[kind]
    }

    #[inline]
    pub fn slots(&self) -> &SlotPool {
        &self.slots
    }

    #[inline]
    pub fn queue(&self) -> &WaitQueue {
        &self.queue
    }

    /// Vehicles currently queued or charging here.
    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.roster.len()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.roster.get(&id)
    }

    pub fn state_of(&self, id: VehicleId) -> Option<VehicleState> {
        self.roster.get(&id).map(Vehicle::state)
    }

    pub fn occupant_of(&self, kind: FuelKind, index: SlotIndex) -> Option<&Vehicle> {
        self.slots.occupant_of(kind, index).and_then(|id| self.roster.get(&id))
    }

    /// Rough ticks until a newly arriving vehicle of `kind` would start
    /// charging: everything already here for that kind, divided by the
    /// combined output of its slots.
    ///
    /// `None` when the kind cannot be served at all (no slots or no output).
    pub fn estimated_wait_ticks(&self, kind: FuelKind) -> Option<u64> {
        let slots = self.slots.capacity(kind);
        let output = self.accounts[kind].output_per_tick();
        if slots == 0 || output <= 0.0 {
            return None;
        }
        if self.slots.free_count(kind) > 0 && self.queue.count_kind(kind) == 0 {
            return Some(0);
        }

        let backlog: f64 = self
            .roster
            .values()
            .filter(|v| v.kind() == kind)
            .map(Vehicle::missing)
            .sum();
        Some((backlog / (slots as f64 * output)).ceil() as u64)
    }

    // ── Invariants ────────────────────────────────────────────────────────

    /// Cross-check roster, slot pool, queue and reserves.
    pub fn check_invariants(&self) -> Result<(), String> {
        self.slots.check()?;

        if !self.queue.is_partitioned() {
            return Err("non-priority entry ahead of a priority entry".into());
        }

        let held = self.queue.len()
            + FuelKind::ALL.iter().map(|&k| self.slots.occupied_count(k)).sum::<usize>();
        if held != self.roster.len() {
            return Err(format!("{} vehicles in roster but {held} in slots + queue", self.roster.len()));
        }

        for (id, vehicle) in &self.roster {
            let queued = self.queue.contains(*id);
            let seated = self.slots.contains(*id);
            match (queued, seated, vehicle.state()) {
                (true, false, VehicleState::Waiting) | (false, true, VehicleState::Charging) => {}
                (q, s, state) => {
                    return Err(format!("{id}: queued={q} seated={s} state={state:?}"));
                }
            }
        }

        for entry in self.queue.iter() {
            if self.roster.get(&entry.vehicle).map(Vehicle::kind) != Some(entry.kind) {
                return Err(format!("{} queued as {} but roster disagrees", entry.vehicle, entry.kind));
            }
        }

        for (kind, account) in self.accounts.iter() {
            if account.reserve() < 0.0 {
                return Err(format!("{kind} reserve {} is negative", account.reserve()));
            }
        }
        Ok(())
    }

    #[inline]
    fn debug_check(&self) {
        #[cfg(debug_assertions)]
        if let Err(violation) = self.check_invariants() {
            panic!("{}: invariant violated: {violation}", self.id);
        }
    }
}
