//! What `request` and `tick` tell their caller.

use cs_core::{FuelKind, PerKind, Tick, VehicleId};
use cs_vehicle::{DepartureReason, Vehicle};

use crate::SlotHandle;

/// Result of [`Station::request`](crate::Station::request).
#[derive(Debug, PartialEq)]
pub enum RequestOutcome {
    /// The vehicle took a free slot and is now `Charging`.
    Accepted(SlotHandle),
    /// All slots of its kind are taken; the vehicle is `Waiting` at this
    /// 0-based queue position.
    Queued { position: usize },
    /// The station refused the vehicle and hands it back untouched.
    Rejected(Vehicle, RejectReason),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RejectReason {
    /// A vehicle with this id is already queued or charging here.
    Duplicate,
    /// The station has no slots of the vehicle's kind.
    UnsupportedFuel,
    /// The tank needs nothing.
    AlreadyFull,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::Duplicate       => "duplicate",
            RejectReason::UnsupportedFuel => "unsupported_fuel",
            RejectReason::AlreadyFull     => "already_full",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle leaving the station for good, with ownership handed back.
#[derive(Clone, Debug, PartialEq)]
pub struct Departure {
    pub vehicle: Vehicle,
    pub reason:  DepartureReason,
    pub at:      Tick,
}

impl Departure {
    #[inline]
    pub fn id(&self) -> VehicleId {
        self.vehicle.id()
    }
}

/// Everything that happened during one [`Station::tick`](crate::Station::tick).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub now:       Tick,
    /// Queue entries that waited too long, in queue order.
    pub evicted:   Vec<Departure>,
    /// Vehicles moved from the queue into a slot.
    pub promoted:  Vec<VehicleId>,
    /// Vehicles that filled up and released their slot.
    pub completed: Vec<Departure>,
    /// Kinds whose reserve could not serve an occupant this tick.
    pub exhausted: Vec<FuelKind>,
    /// Units transferred into vehicles this tick.
    pub dispensed: PerKind<f64>,
    /// `false` when the tick was ignored because it did not advance time.
    pub applied:   bool,
}

impl TickReport {
    pub(crate) fn new(now: Tick) -> Self {
        Self { now, applied: true, ..Self::default() }
    }

    pub(crate) fn skipped(now: Tick) -> Self {
        Self { now, ..Self::default() }
    }

    /// Every departure of this tick: evictions first, then completions.
    pub fn departures(&self) -> impl Iterator<Item = &Departure> + '_ {
        self.evicted.iter().chain(self.completed.iter())
    }

    pub fn into_departures(self) -> impl Iterator<Item = Departure> {
        self.evicted.into_iter().chain(self.completed)
    }

    pub fn is_quiet(&self) -> bool {
        self.evicted.is_empty() && self.promoted.is_empty() && self.completed.is_empty()
    }
}
