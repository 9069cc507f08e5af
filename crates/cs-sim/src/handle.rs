//! `StationHandle` — a station shared between threads.
//!
//! The [`Station`] and the registry of agents waiting on it live behind one
//! `parking_lot::Mutex`.  A request registers its completion channel under
//! the same lock that admits the vehicle, and a tick delivers departures
//! under the same lock that produced them, so a departure can never be
//! produced for a vehicle whose waiter is not yet registered.
//!
//! Completion is a `sync_channel(1)` per admitted vehicle.  The station sends
//! exactly once, with `try_send`, so the lock holder never blocks on an agent.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};

use cs_core::{FuelKind, StationId, Tick, VehicleId};
use cs_station::{
    Departure, IdMap, RejectReason, RequestOutcome, SlotHandle, Station, StationResult,
    TickReport,
};
use cs_vehicle::Vehicle;
use parking_lot::Mutex;

use crate::{SimError, SimResult};

struct Shared {
    station: Station,
    waiters: IdMap<VehicleId, SyncSender<Departure>>,
}

impl Shared {
    fn register(&mut self, station: StationId, vehicle: VehicleId) -> Ticket {
        let (tx, rx) = mpsc::sync_channel(1);
        self.waiters.insert(vehicle, tx);
        Ticket { station, vehicle, rx }
    }

    fn deliver(&mut self, departure: &Departure) {
        let Some(tx) = self.waiters.remove(&departure.id()) else {
            return;
        };
        if tx.try_send(departure.clone()).is_err() {
            tracing::debug!(vehicle = %departure.id(), "waiter gone; departure dropped");
        }
    }
}

/// Cheap to clone; every clone refers to the same station.
#[derive(Clone)]
pub struct StationHandle {
    id:    StationId,
    inner: Arc<Mutex<Shared>>,
}

/// How a station answered [`StationHandle::request`].
#[derive(Debug)]
pub enum Admission {
    Charging { slot: SlotHandle, ticket: Ticket },
    Queued { position: usize, ticket: Ticket },
    Rejected(Vehicle, RejectReason),
}

impl Admission {
    /// The ticket of an admitted vehicle, or the rejected vehicle and reason.
    pub fn into_ticket(self) -> Result<Ticket, (Vehicle, RejectReason)> {
        match self {
            Admission::Charging { ticket, .. } | Admission::Queued { ticket, .. } => Ok(ticket),
            Admission::Rejected(vehicle, reason) => Err((vehicle, reason)),
        }
    }
}

impl StationHandle {
    pub fn new(station: Station) -> Self {
        Self {
            id:    station.id(),
            inner: Arc::new(Mutex::new(Shared { station, waiters: IdMap::default() })),
        }
    }

    #[inline]
    pub fn id(&self) -> StationId {
        self.id
    }

    /// Hand `vehicle` to the station at `now`.
    pub fn request(&self, vehicle: Vehicle, now: Tick) -> Admission {
        let id = vehicle.id();
        let mut shared = self.inner.lock();
        let outcome = shared.station.request(vehicle, now);
        match outcome {
            RequestOutcome::Accepted(slot) => Admission::Charging {
                slot,
                ticket: shared.register(self.id, id),
            },
            RequestOutcome::Queued { position } => Admission::Queued {
                position,
                ticket: shared.register(self.id, id),
            },
            RequestOutcome::Rejected(vehicle, reason) => Admission::Rejected(vehicle, reason),
        }
    }

    /// Advance the station and notify every departing vehicle's agent.
    pub fn tick(&self, now: Tick) -> TickReport {
        let mut shared = self.inner.lock();
        let report = shared.station.tick(now);
        for departure in report.departures() {
            shared.deliver(departure);
        }
        report
    }

    /// Send every vehicle away with `Shutdown` and notify their agents.
    pub fn shutdown(&self, now: Tick) -> Vec<Departure> {
        let mut shared = self.inner.lock();
        let departures = shared.station.shutdown(now);
        for departure in &departures {
            shared.deliver(departure);
        }
        departures
    }

    pub fn set_reserve(&self, kind: FuelKind, value: f64) -> StationResult<()> {
        self.inner.lock().station.set_reserve(kind, value)
    }

    /// Run `f` against a consistent view of the station.
    ///
    /// The lock is held for the duration of `f`; keep it short.
    pub fn with<R>(&self, f: impl FnOnce(&Station) -> R) -> R {
        f(&self.inner.lock().station)
    }

    pub fn free_slots(&self, kind: FuelKind) -> usize {
        self.with(|s| s.free_slots(kind))
    }

    pub fn queue_length(&self) -> usize {
        self.with(Station::queue_length)
    }

    pub fn reserve_level(&self, kind: FuelKind) -> f64 {
        self.with(|s| s.reserve_level(kind))
    }

    pub fn estimated_wait_ticks(&self, kind: FuelKind) -> Option<u64> {
        self.with(|s| s.estimated_wait_ticks(kind))
    }

    /// Agents currently blocked on this station.
    pub fn waiting_agents(&self) -> usize {
        self.inner.lock().waiters.len()
    }
}

impl std::fmt::Debug for StationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationHandle").field("id", &self.id).finish_non_exhaustive()
    }
}

// ── Ticket ────────────────────────────────────────────────────────────────────

/// The receiving end of one admitted vehicle's completion signal.
#[derive(Debug)]
pub struct Ticket {
    station: StationId,
    vehicle: VehicleId,
    rx:      Receiver<Departure>,
}

impl Ticket {
    #[inline]
    pub fn vehicle(&self) -> VehicleId {
        self.vehicle
    }

    #[inline]
    pub fn station(&self) -> StationId {
        self.station
    }

    /// Block until the vehicle departs.
    ///
    /// Fails only if every handle to the station was dropped first.
    pub fn wait(self) -> SimResult<Departure> {
        self.rx.recv().map_err(|_| SimError::StationClosed {
            station: self.station,
            vehicle: self.vehicle,
        })
    }

    /// The departure, if it has already happened.
    pub fn try_wait(&self) -> SimResult<Option<Departure>> {
        match self.rx.try_recv() {
            Ok(departure) => Ok(Some(departure)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(SimError::StationClosed {
                station: self.station,
                vehicle: self.vehicle,
            }),
        }
    }
}
