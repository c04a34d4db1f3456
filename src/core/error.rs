//! Error types shared by the simulation core and the record store.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Simulation {0} not found")]
    NotFound(String),

    #[error("Simulation id {0} is already in use")]
    IdConflict(String),

    #[error("Simulation is invalid and cannot be calculated: {}", .0.join("; "))]
    InvalidRecord(Vec<String>),

    #[error("Simulation {0} has not been calculated")]
    NotCalculated(String),

    #[error("At least {required} calculated simulations are required, found {found}")]
    InsufficientRecords { found: usize, required: usize },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed simulation file {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to export to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl SimulationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = SimulationError> = std::result::Result<T, E>;
