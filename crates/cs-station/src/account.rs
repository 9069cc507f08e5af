//! `ResourceAccount` — one kind's finite reserve and its dispensing rules.
//!
//! Each tick an occupant receives
//!
//! ```text
//!   amount = min(output_per_tick, vehicle.missing(), reserve)
//! ```
//!
//! and exactly `amount` leaves the reserve.  Nothing is created or lost in a
//! transfer, and the reserve can never go negative.

use cs_core::FuelKind;
use cs_vehicle::Vehicle;

use crate::{StationError, StationResult};

/// What one `charge_tick` call did.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ChargeOutcome {
    /// This many units moved from the reserve into the vehicle.
    Transferred(f64),
    /// The vehicle needed nothing.
    AlreadyFull,
    /// The reserve is empty; the vehicle keeps its slot and waits for
    /// replenishment.
    Exhausted,
    /// The kind dispenses 0 per tick.
    NoOutput,
}

impl ChargeOutcome {
    #[inline]
    pub fn amount(self) -> f64 {
        match self {
            ChargeOutcome::Transferred(a) => a,
            _ => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceAccount {
    kind:               FuelKind,
    reserve:            f64,
    output_per_tick:    f64,
    replenish_per_tick: f64,
    dispensed:          f64,
    replenished:        f64,
}

impl ResourceAccount {
    /// Values are validated by [`StationConfig`](crate::StationConfig) before
    /// an account is built.
    pub(crate) fn new(kind: FuelKind, reserve: f64, output_per_tick: f64, replenish_per_tick: f64) -> Self {
        Self {
            kind,
            reserve,
            output_per_tick,
            replenish_per_tick,
            dispensed: 0.0,
            replenished: 0.0,
        }
    }

    /// Move one tick's worth of resource into `vehicle`.
    pub fn charge_tick(&mut self, vehicle: &mut Vehicle) -> ChargeOutcome {
        debug_assert_eq!(vehicle.kind(), self.kind, "{} charged from {} account", vehicle.id(), self.kind);

        let missing = vehicle.missing();
        if missing <= 0.0 {
            return ChargeOutcome::AlreadyFull;
        }
        if self.output_per_tick <= 0.0 {
            return ChargeOutcome::NoOutput;
        }
        if self.reserve <= 0.0 {
            return ChargeOutcome::Exhausted;
        }

        let amount = self.output_per_tick.min(missing).min(self.reserve);
        let added = vehicle.refuel(amount);
        self.reserve = (self.reserve - added).max(0.0);
        self.dispensed += added;
        ChargeOutcome::Transferred(added)
    }

    /// Add one tick's replenishment and return the amount added.
    pub fn replenish(&mut self) -> f64 {
        let amount = self.replenish_per_tick;
        if amount > 0.0 {
            self.reserve += amount;
            self.replenished += amount;
        }
        amount
    }

    /// Overwrite the reserve (e.g. a delivery arriving outside the tick
    /// cycle).
    pub fn set_reserve(&mut self, value: f64) -> StationResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(StationError::InvalidReserve { kind: self.kind, value });
        }
        self.reserve = value;
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn kind(&self) -> FuelKind {
        self.kind
    }

    #[inline]
    pub fn reserve(&self) -> f64 {
        self.reserve
    }

    #[inline]
    pub fn output_per_tick(&self) -> f64 {
        self.output_per_tick
    }

    #[inline]
    pub fn replenish_per_tick(&self) -> f64 {
        self.replenish_per_tick
    }

    /// Total transferred into vehicles since construction.
    #[inline]
    pub fn dispensed(&self) -> f64 {
        self.dispensed
    }

    /// Total added by replenishment since construction.
    #[inline]
    pub fn replenished(&self) -> f64 {
        self.replenished
    }
}
