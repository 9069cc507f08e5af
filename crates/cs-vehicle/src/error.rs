use cs_core::VehicleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("{id}: capacity must be finite and > 0, got {capacity}")]
    InvalidCapacity { id: VehicleId, capacity: f64 },

    #[error("{id}: level {level} outside [0, {capacity}]")]
    InvalidLevel {
        id:       VehicleId,
        level:    f64,
        capacity: f64,
    },

    #[error("duplicate vehicle id {0} in fleet")]
    DuplicateId(VehicleId),

    #[error("fleet generator misconfigured: {0}")]
    Generator(String),

    #[error("fleet parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type VehicleResult<T> = Result<T, VehicleError>;
