//! CSV fleet loader.
//!
//! # CSV format
//!
//! One row per vehicle.  `priority` and `max_wait` may be left empty.
//!
//! ```csv
//! vehicle_id,fuel,capacity,level,max_wait,priority
//! 0,gas,120,60.9,900,false
//! 1,electric,30,13,,true
//! 2,electric,70,,15,
//! ```
//!
//! | Column     | Meaning                                          | Default            |
//! |------------|--------------------------------------------------|--------------------|
//! | `fuel`     | `gas` or `electric`                              | required           |
//! | `capacity` | tank size, > 0                                   | required           |
//! | `level`    | fuel already in the tank, `[0, capacity]`        | `0`                |
//! | `max_wait` | acceptable queue wait in ticks                   | `DEFAULT_MAX_WAIT` |
//! | `priority` | `true` / `false`                                 | `false`            |
//!
//! Every row goes through [`VehicleBuilder`], so a file never yields a
//! vehicle the builder would reject.  Duplicate ids fail the whole load.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cs_core::{FuelKind, VehicleId};

use crate::{DEFAULT_MAX_WAIT, Vehicle, VehicleBuilder, VehicleError, VehicleResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FleetRecord {
    vehicle_id: u32,
    fuel:       String,
    capacity:   f64,
    level:      Option<f64>,
    max_wait:   Option<u64>,
    priority:   Option<bool>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a fleet from a CSV file.  Vehicles are returned in file order.
pub fn load_fleet_csv(path: &Path) -> VehicleResult<Vec<Vehicle>> {
    let file = std::fs::File::open(path)?;
    load_fleet_reader(file)
}

/// Like [`load_fleet_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedding a fleet in a
/// binary.
pub fn load_fleet_reader<R: Read>(reader: R) -> VehicleResult<Vec<Vehicle>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut seen: HashSet<VehicleId> = HashSet::new();
    let mut fleet = Vec::new();

    for result in csv_reader.deserialize::<FleetRecord>() {
        let row = result.map_err(|e| VehicleError::Parse(e.to_string()))?;
        let id = VehicleId(row.vehicle_id);
        if !seen.insert(id) {
            return Err(VehicleError::DuplicateId(id));
        }

        let kind = parse_fuel(&row.fuel)?;
        let vehicle = VehicleBuilder::new(id, kind, row.capacity)
            .level(row.level.unwrap_or(0.0))
            .max_wait(row.max_wait.unwrap_or(DEFAULT_MAX_WAIT))
            .priority(row.priority.unwrap_or(false))
            .build()?;
        fleet.push(vehicle);
    }

    Ok(fleet)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_fuel(s: &str) -> VehicleResult<FuelKind> {
    FuelKind::parse(s).ok_or_else(|| {
        VehicleError::Parse(format!(
            "invalid fuel {s:?}: expected \"gas\" or \"electric\""
        ))
    })
}
