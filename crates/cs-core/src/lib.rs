//! `cs-core` — foundational types for the charging-station fleet simulator.
//!
//! This crate is a dependency of every other `cs-*` crate.  It intentionally
//! has no `cs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `StationId`, `SlotIndex`                 |
//! | [`fuel`]        | `FuelKind` enum, `PerKind<T>` lookup table            |
//! | [`geo`]         | `GeoPoint` and WGS-84 range validation               |
//! | [`time`]        | `Tick`, `SimConfig`                                   |
//! | [`rng`]         | `VehicleRng` (per-vehicle), `SimRng` (global)         |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod fuel;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use fuel::{FuelKind, PerKind};
pub use geo::GeoPoint;
pub use ids::{SlotIndex, StationId, VehicleId};
pub use rng::{SimRng, VehicleRng};
pub use time::{SimConfig, Tick};
