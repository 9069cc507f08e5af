//! `cs-vehicle` — the vehicle model for the charging-station simulator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`vehicle`]     | `Vehicle`, `VehicleState`, `DepartureReason`              |
//! | [`builder`]     | `VehicleBuilder` (validated construction)                 |
//! | [`loader`]      | CSV fleet loader                                          |
//! | [`generator`]   | `FleetGenerator` (seeded random fleets)                   |
//! | [`error`]       | `VehicleError`, `VehicleResult`                           |
//!
//! A `Vehicle` is owned by whoever drives it (a `VehicleAgent` thread in
//! `cs-sim`, or a test).  While it is at a station the station owns it; the
//! vehicle only remembers the station's id, never a reference to it.

pub mod builder;
pub mod error;
pub mod generator;
pub mod loader;
pub mod vehicle;


pub use builder::{VehicleBuilder, DEFAULT_MAX_WAIT};
pub use error::{VehicleError, VehicleResult};
pub use generator::FleetGenerator;
pub use loader::{load_fleet_csv, load_fleet_reader};
pub use vehicle::{DepartureReason, Vehicle, VehicleState};
