use cs_core::{FuelKind, GeoPoint};
use thiserror::Error;

/// Why a station could not be built.  Raised once, by
/// [`Station::new`](crate::Station::new); the caller decides whether to skip
/// the station or abort the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("station has 0 slots of every kind")]
    NoSlots,

    #[error("{kind} slot count {count} is negative")]
    NegativeSlots { kind: FuelKind, count: i32 },

    #[error("{kind} slot count {count} exceeds {max}")]
    TooManySlots { kind: FuelKind, count: i32, max: u16 },

    #[error("{kind} {field} must be finite, got {value}")]
    NonFinite {
        kind:  FuelKind,
        field: &'static str,
        value: f64,
    },

    #[error("{kind} output per tick {value} is negative")]
    NegativeOutput { kind: FuelKind, value: f64 },

    #[error("{kind} reserve {value} is negative")]
    NegativeReserve { kind: FuelKind, value: f64 },

    #[error("{kind} replenish rate {value} is negative")]
    NegativeReplenish { kind: FuelKind, value: f64 },

    #[error("0 {kind} slots but {field} is {value}")]
    ResourceWithoutSlots {
        kind:  FuelKind,
        field: &'static str,
        value: f64,
    },

    #[error("station has 0 reserve and 0 replenishment of every kind")]
    NoResource,

    #[error("location {0} is outside WGS-84 range")]
    InvalidLocation(GeoPoint),
}

/// Runtime misuse of a constructed station that is reported rather than
/// absorbed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StationError {
    #[error("{kind} reserve must be finite and >= 0, got {value}")]
    InvalidReserve { kind: FuelKind, value: f64 },

    #[error("station has no {0} slots")]
    UnsupportedFuel(FuelKind),
}

pub type StationResult<T> = Result<T, StationError>;
