//! The `Vehicle` record and its per-station lifecycle.
//!
//! ```text
//!   Idle ──request──► Charging ──full──────────► Departed(Full)
//!     │                  ▲
//!     └────queued──► Waiting ──max wait exceeded──► Departed(Timeout)
//!                        (promotion)
//! ```
//!
//! Any non-terminal state can also end in `Departed(Shutdown)` when the
//! station stops.  Only the station controller moves a vehicle between
//! states; the transition methods below are `pub` because the controller
//! lives in another crate.

use cs_core::{FuelKind, StationId, Tick, VehicleId};

/// Why a vehicle left a station.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepartureReason {
    /// Waited in the queue longer than its acceptable wait.
    Timeout,
    /// Tank reached capacity.
    Full,
    /// The station stopped before the vehicle finished.
    Shutdown,
}

impl DepartureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DepartureReason::Timeout  => "timeout",
            DepartureReason::Full     => "full",
            DepartureReason::Shutdown => "shutdown",
        }
    }
}

impl std::fmt::Display for DepartureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a vehicle is in its lifecycle at its current station.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleState {
    /// Not at any station.
    #[default]
    Idle,
    /// In a station's wait queue.
    Waiting,
    /// Holding a slot.
    Charging,
    /// Left its last station.
    Departed(DepartureReason),
}

impl VehicleState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, VehicleState::Departed(_))
    }
}

/// One vehicle.  Build with [`VehicleBuilder`](crate::VehicleBuilder).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub(crate) id:       VehicleId,
    pub(crate) kind:     FuelKind,
    pub(crate) capacity: f64,
    pub(crate) level:    f64,
    pub(crate) max_wait: u64,
    pub(crate) priority: bool,
    pub(crate) arrival:  Option<Tick>,
    pub(crate) state:    VehicleState,
    pub(crate) station:  Option<StationId>,
}

impl Vehicle {
    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> FuelKind {
        self.kind
    }

    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Longest wait in ticks this vehicle accepts before leaving a queue.
    #[inline]
    pub fn max_wait(&self) -> u64 {
        self.max_wait
    }

    #[inline]
    pub fn is_priority(&self) -> bool {
        self.priority
    }

    /// Tick at which the vehicle joined its current queue.  `None` unless
    /// the vehicle is `Waiting`.
    #[inline]
    pub fn arrival(&self) -> Option<Tick> {
        self.arrival
    }

    #[inline]
    pub fn state(&self) -> VehicleState {
        self.state
    }

    /// Station currently holding this vehicle (waiting or charging).
    #[inline]
    pub fn station(&self) -> Option<StationId> {
        self.station
    }

    /// Fuel needed to fill the tank.
    #[inline]
    pub fn missing(&self) -> f64 {
        (self.capacity - self.level).max(0.0)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.level >= self.capacity
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Add up to `amount` fuel and return how much was actually added.
    ///
    /// Non-positive or NaN amounts add nothing.  An amount covering the
    /// missing fuel sets the level to exactly `capacity`, so a completed
    /// fill never leaves a rounding residue below capacity.
    pub fn refuel(&mut self, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let missing = self.missing();
        if amount >= missing {
            self.level = self.capacity;
            missing
        } else {
            self.level += amount;
            amount
        }
    }

    /// Joined `station`'s wait queue at `now`.
    pub fn mark_waiting(&mut self, station: StationId, now: Tick) {
        self.state   = VehicleState::Waiting;
        self.station = Some(station);
        self.arrival = Some(now);
    }

    /// Took a slot at `station` (directly or by promotion).
    pub fn mark_charging(&mut self, station: StationId) {
        self.state   = VehicleState::Charging;
        self.station = Some(station);
        self.arrival = None;
    }

    /// Left its station for `reason`.  Ownership returns to the driver.
    pub fn depart(&mut self, reason: DepartureReason) {
        self.state   = VehicleState::Departed(reason);
        self.station = None;
        self.arrival = None;
    }
}
