//! Station construction parameters and their validation.

use cs_core::{FuelKind, GeoPoint, PerKind, StationId};

use crate::{ConstructionError, Station};

/// Parameters of one fuel kind at a station.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KindConfig {
    /// Signed so that a negative count from an external source is reported
    /// instead of silently wrapping.
    pub slots:              i32,
    pub output_per_tick:    f64,
    pub reserve:            f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub replenish_per_tick: f64,
}

impl KindConfig {
    pub fn new(slots: i32, output_per_tick: f64, reserve: f64) -> Self {
        Self { slots, output_per_tick, reserve, replenish_per_tick: 0.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationConfig {
    pub id:          StationId,
    pub location:    GeoPoint,
    pub fuels:       PerKind<KindConfig>,
    /// Upper bound on any vehicle's wait at this station, in ticks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub wait_ceiling: Option<u64>,
}

impl StationConfig {
    pub fn new(id: StationId) -> Self {
        Self {
            id,
            location: GeoPoint::default(),
            fuels: PerKind::default(),
            wait_ceiling: None,
        }
    }

    /// Check every construction rule; the first violation wins.
    pub fn validate(&self) -> Result<(), ConstructionError> {
        if !self.location.is_valid() {
            return Err(ConstructionError::InvalidLocation(self.location));
        }

        for (kind, fuel) in self.fuels.iter() {
            if fuel.slots < 0 {
                return Err(ConstructionError::NegativeSlots { kind, count: fuel.slots });
            }
            if fuel.slots > i32::from(u16::MAX) {
                return Err(ConstructionError::TooManySlots { kind, count: fuel.slots, max: u16::MAX });
            }
        }
        if self.fuels.iter().all(|(_, f)| f.slots == 0) {
            return Err(ConstructionError::NoSlots);
        }

        for (kind, fuel) in self.fuels.iter() {
            check_amounts(kind, fuel)?;
        }
        if self.fuels.iter().all(|(_, f)| f.reserve == 0.0 && f.replenish_per_tick == 0.0) {
            return Err(ConstructionError::NoResource);
        }
        Ok(())
    }

    /// Slot counts as the pool stores them.  Only meaningful after
    /// [`validate`](Self::validate) succeeded.
    pub(crate) fn slot_counts(&self) -> PerKind<u16> {
        PerKind::from_fn(|kind| u16::try_from(self.fuels[kind].slots).unwrap_or(0))
    }
}

fn check_amounts(kind: FuelKind, fuel: &KindConfig) -> Result<(), ConstructionError> {
    let fields = [
        ("output_per_tick", fuel.output_per_tick),
        ("reserve", fuel.reserve),
        ("replenish_per_tick", fuel.replenish_per_tick),
    ];

    for (field, value) in fields {
        if !value.is_finite() {
            return Err(ConstructionError::NonFinite { kind, field, value });
        }
    }
    if fuel.output_per_tick < 0.0 {
        return Err(ConstructionError::NegativeOutput { kind, value: fuel.output_per_tick });
    }
    if fuel.reserve < 0.0 {
        return Err(ConstructionError::NegativeReserve { kind, value: fuel.reserve });
    }
    if fuel.replenish_per_tick < 0.0 {
        return Err(ConstructionError::NegativeReplenish { kind, value: fuel.replenish_per_tick });
    }

    // A kind without slots can never dispense, so any resource for it is a
    // misconfiguration.
    if fuel.slots == 0 {
        if let Some((field, value)) = fields.into_iter().find(|(_, v)| *v > 0.0) {
            return Err(ConstructionError::ResourceWithoutSlots { kind, field, value });
        }
    }
    Ok(())
}

// ── StationBuilder ────────────────────────────────────────────────────────────

/// Fluent construction of a [`Station`].
///
/// ```rust
/// use cs_core::{FuelKind, StationId};
/// use cs_station::StationBuilder;
///
/// let station = StationBuilder::new(StationId(0))
///     .fuel(FuelKind::Gas, 2, 5.0, 500.0)
///     .fuel(FuelKind::Electric, 4, 1.5, 2_000.0)
///     .replenish(FuelKind::Electric, 3.0)
///     .build()
///     .unwrap();
/// assert_eq!(station.free_slots(FuelKind::Electric), 4);
/// ```
#[derive(Clone, Debug)]
pub struct StationBuilder {
    config: StationConfig,
}

impl StationBuilder {
    pub fn new(id: StationId) -> Self {
        Self { config: StationConfig::new(id) }
    }

    pub fn location(mut self, location: GeoPoint) -> Self {
        self.config.location = location;
        self
    }

    /// Slots, per-tick output and starting reserve for `kind`.
    pub fn fuel(mut self, kind: FuelKind, slots: i32, output_per_tick: f64, reserve: f64) -> Self {
        let fuel = &mut self.config.fuels[kind];
        fuel.slots = slots;
        fuel.output_per_tick = output_per_tick;
        fuel.reserve = reserve;
        self
    }

    pub fn replenish(mut self, kind: FuelKind, per_tick: f64) -> Self {
        self.config.fuels[kind].replenish_per_tick = per_tick;
        self
    }

    pub fn wait_ceiling(mut self, ticks: u64) -> Self {
        self.config.wait_ceiling = Some(ticks);
        self
    }

    pub fn config(self) -> StationConfig {
        self.config
    }

    pub fn build(self) -> Result<Station, ConstructionError> {
        Station::new(self.config)
    }
}
