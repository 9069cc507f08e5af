//! Seeded random fleets.
//!
//! Each vehicle's attributes are drawn from its own [`VehicleRng`], so the
//! vehicle with id `n` is identical whether the fleet has 10 or 10 000
//! members.

use std::ops::RangeInclusive;

use cs_core::{FuelKind, VehicleId, VehicleRng};

use crate::{Vehicle, VehicleBuilder, VehicleError, VehicleResult};

/// Parameters for [`generate`](Self::generate).
#[derive(Clone, Debug)]
pub struct FleetGenerator {
    pub seed: u64,
    /// Probability that a vehicle is electric.
    pub electric_share: f64,
    /// Probability that a vehicle has the priority flag.
    pub priority_share: f64,
    /// Tank sizes, in fuel units.
    pub capacity: RangeInclusive<f64>,
    /// Initial fill as a fraction of capacity.
    pub initial_fill: RangeInclusive<f64>,
    /// Acceptable queue wait, in ticks.
    pub max_wait: RangeInclusive<u64>,
}

impl Default for FleetGenerator {
    fn default() -> Self {
        Self {
            seed:           0,
            electric_share: 0.5,
            priority_share: 0.1,
            capacity:       30.0..=120.0,
            initial_fill:   0.05..=0.6,
            max_wait:       10..=60,
        }
    }
}

impl FleetGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    /// Generate `count` vehicles with ids `first_id..first_id + count`.
    pub fn generate(&self, first_id: u32, count: u32) -> VehicleResult<Vec<Vehicle>> {
        self.validate()?;
        let end = first_id.checked_add(count).ok_or_else(|| {
            VehicleError::Generator(format!("{count} ids from {first_id} overflow the id space"))
        })?;
        (first_id..end)
            .map(|i| self.vehicle(VehicleId(i)))
            .collect()
    }

    fn vehicle(&self, id: VehicleId) -> VehicleResult<Vehicle> {
        let mut rng = VehicleRng::new(self.seed, id);
        let kind = if rng.gen_bool(self.electric_share) {
            FuelKind::Electric
        } else {
            FuelKind::Gas
        };
        let capacity = rng.gen_range(self.capacity.clone());
        let fill = rng.gen_range(self.initial_fill.clone());
        let max_wait = rng.gen_range(self.max_wait.clone());
        let priority = rng.gen_bool(self.priority_share);

        VehicleBuilder::new(id, kind, capacity)
            .level((capacity * fill).min(capacity))
            .max_wait(max_wait)
            .priority(priority)
            .build()
    }

    fn validate(&self) -> VehicleResult<()> {
        let (cap_lo, cap_hi) = (*self.capacity.start(), *self.capacity.end());
        if !(cap_lo > 0.0 && cap_lo <= cap_hi && cap_hi.is_finite()) {
            return Err(VehicleError::Generator(format!(
                "capacity range {cap_lo}..={cap_hi} must be finite, positive and non-empty"
            )));
        }
        let (fill_lo, fill_hi) = (*self.initial_fill.start(), *self.initial_fill.end());
        if !(0.0 <= fill_lo && fill_lo <= fill_hi && fill_hi <= 1.0) {
            return Err(VehicleError::Generator(format!(
                "initial_fill range {fill_lo}..={fill_hi} must lie within [0, 1]"
            )));
        }
        if self.max_wait.is_empty() {
            return Err(VehicleError::Generator("max_wait range is empty".into()));
        }
        Ok(())
    }
}
