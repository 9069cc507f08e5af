//! Framework error type.
//!
//! Sub-crates define their own error enums (`VehicleError`,
//! `ConstructionError`, `SimError`, …) and wrap `CoreError` where a core
//! validation fails inside them.

use thiserror::Error;

/// The top-level error type for `cs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `cs-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
