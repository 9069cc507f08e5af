//! `VehicleAgent` — one vehicle's thread of control.
//!
//! The agent moves its `Vehicle` into the request, so a vehicle can have at
//! most one outstanding request at a time.  After admission it blocks on its
//! [`Ticket`](crate::Ticket) until the station reports a terminal transition
//! and gets the vehicle back inside the [`Departure`].

use std::thread::{self, JoinHandle};

use cs_core::VehicleId;
use cs_station::{Departure, RejectReason};
use cs_vehicle::{DepartureReason, Vehicle};

use crate::{Admission, Clock, SimError, SimResult, StationHandle};

/// How an agent's visit ended.
#[derive(Debug, PartialEq)]
pub enum AgentOutcome {
    Departed(Departure),
    Rejected(Vehicle, RejectReason),
}

impl AgentOutcome {
    pub fn vehicle(&self) -> &Vehicle {
        match self {
            AgentOutcome::Departed(d) => &d.vehicle,
            AgentOutcome::Rejected(v, _) => v,
        }
    }

    /// `Some(reason)` if the vehicle was admitted and later departed.
    pub fn reason(&self) -> Option<DepartureReason> {
        match self {
            AgentOutcome::Departed(d) => Some(d.reason),
            AgentOutcome::Rejected(..) => None,
        }
    }
}

pub struct VehicleAgent {
    vehicle: Vehicle,
    station: StationHandle,
}

impl VehicleAgent {
    pub fn new(vehicle: Vehicle, station: StationHandle) -> Self {
        Self { vehicle, station }
    }

    /// Request a slot and block until the visit ends.
    pub fn run<C: Clock>(self, clock: &C) -> SimResult<AgentOutcome> {
        let id = self.vehicle.id();
        let now = clock.now();
        match self.station.request(self.vehicle, now) {
            Admission::Rejected(vehicle, reason) => {
                tracing::debug!(vehicle = %id, station = %self.station.id(), %reason, "agent turned away");
                Ok(AgentOutcome::Rejected(vehicle, reason))
            }
            Admission::Charging { ticket, .. } | Admission::Queued { ticket, .. } => {
                let departure = ticket.wait()?;
                tracing::debug!(
                    vehicle = %id,
                    station = %self.station.id(),
                    reason = %departure.reason,
                    waited_ticks = departure.at.since(now),
                    "agent done"
                );
                Ok(AgentOutcome::Departed(departure))
            }
        }
    }

    /// [`run`](Self::run) on a dedicated thread named `vehicle-<id>`.
    pub fn spawn<C: Clock>(self, clock: C) -> SimResult<AgentHandle> {
        let id = self.vehicle.id();
        let join = thread::Builder::new()
            .name(format!("vehicle-{}", id.0))
            .spawn(move || self.run(&clock))
            .map_err(|source| SimError::Spawn { what: format!("agent for {id}"), source })?;
        Ok(AgentHandle { id, join })
    }
}

pub struct AgentHandle {
    id:   VehicleId,
    join: JoinHandle<SimResult<AgentOutcome>>,
}

impl AgentHandle {
    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    pub fn join(self) -> SimResult<AgentOutcome> {
        self.join
            .join()
            .map_err(|_| SimError::WorkerPanicked(format!("agent for {}", self.id)))?
    }
}
