use cs_core::{CoreError, StationId, VehicleId};
use cs_station::ConstructionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("run configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("station construction failed: {0}")]
    Construction(#[from] ConstructionError),

    #[error("no station with id {0}")]
    UnknownStation(StationId),

    #[error("station id {0} registered twice")]
    DuplicateStation(StationId),

    #[error("failed to spawn {what} thread: {source}")]
    Spawn {
        what:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("{station} went away before {vehicle} finished")]
    StationClosed {
        station: StationId,
        vehicle: VehicleId,
    },

    #[error("{0} thread panicked")]
    WorkerPanicked(String),
}

pub type SimResult<T> = Result<T, SimError>;
