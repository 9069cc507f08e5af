//! Fluent builder for validated [`Vehicle`]s.
//!
//! # Usage
//!
//! ```rust
//! use cs_core::{FuelKind, VehicleId};
//! use cs_vehicle::VehicleBuilder;
//!
//! let car = VehicleBuilder::new(VehicleId(1), FuelKind::Electric, 70.0)
//!     .level(20.0)
//!     .max_wait(15)
//!     .priority(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(car.missing(), 50.0);
//! assert!(car.is_priority());
//! ```

use cs_core::{FuelKind, VehicleId};

use crate::{Vehicle, VehicleError, VehicleResult, VehicleState};

/// Wait ceiling used when the builder is not given one, in ticks.
pub const DEFAULT_MAX_WAIT: u64 = 900;

/// Builder for [`Vehicle`].  Only [`build`](Self::build) validates.
pub struct VehicleBuilder {
    id:       VehicleId,
    kind:     FuelKind,
    capacity: f64,
    level:    f64,
    max_wait: u64,
    priority: bool,
}

impl VehicleBuilder {
    /// Start a vehicle with an empty tank of `capacity` units.
    pub fn new(id: VehicleId, kind: FuelKind, capacity: f64) -> Self {
        Self {
            id,
            kind,
            capacity,
            level:    0.0,
            max_wait: DEFAULT_MAX_WAIT,
            priority: false,
        }
    }

    /// Fuel already in the tank.  Must end up in `[0, capacity]`.
    pub fn level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    /// Longest acceptable queue wait in ticks.
    pub fn max_wait(mut self, ticks: u64) -> Self {
        self.max_wait = ticks;
        self
    }

    /// Priority vehicles are queued ahead of every non-priority vehicle.
    pub fn priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    pub fn build(self) -> VehicleResult<Vehicle> {
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(VehicleError::InvalidCapacity {
                id:       self.id,
                capacity: self.capacity,
            });
        }
        if !self.level.is_finite() || self.level < 0.0 || self.level > self.capacity {
            return Err(VehicleError::InvalidLevel {
                id:       self.id,
                level:    self.level,
                capacity: self.capacity,
            });
        }

        Ok(Vehicle {
            id:       self.id,
            kind:     self.kind,
            capacity: self.capacity,
            level:    self.level,
            max_wait: self.max_wait,
            priority: self.priority,
            arrival:  None,
            state:    VehicleState::Idle,
            station:  None,
        })
    }
}
