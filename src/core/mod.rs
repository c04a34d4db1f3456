//! Core business logic: records, validation, projection and comparison

pub mod comparison;
pub mod config;
pub mod error;
pub mod export;
pub mod log;
pub mod projection;
pub mod simulation;
pub mod validation;

// Re-export main types for cleaner imports
pub use comparison::{Comparison, ComparisonEntry};
pub use error::SimulationError;
pub use simulation::{
    ChangeLogEntry, MonthResult, RateMode, Simulation, SimulationOutcome, SimulationSummary,
    SimulationUpdate,
};
pub use validation::{ValidationReport, validate};
