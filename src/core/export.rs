//! Delimited table export of a calculated simulation.

use crate::core::error::{Result, SimulationError};
use crate::core::simulation::Simulation;
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub const HEADER: [&str; 6] = [
    "month_index",
    "contribution_this_month",
    "cumulative_contributed",
    "interest_this_month",
    "cumulative_interest",
    "ending_balance",
];

/// Writes one header row plus one row per month to `writer`.
///
/// Monetary values are rounded to two decimals.
pub fn write_table<W: Write>(simulation: &Simulation, writer: W, delimiter: u8) -> csv::Result<()> {
    let mut table = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    table.write_record(HEADER)?;
    for month in &simulation.monthly_results {
        table.write_record([
            month.month_index.to_string(),
            format!("{:.2}", month.contribution_this_month),
            format!("{:.2}", month.cumulative_contributed),
            format!("{:.2}", month.interest_this_month),
            format!("{:.2}", month.cumulative_interest),
            format!("{:.2}", month.ending_balance),
        ])?;
    }
    table.flush()?;
    Ok(())
}

/// Exports a calculated simulation to `path`.
pub fn export_to_path(simulation: &Simulation, path: &Path, delimiter: u8) -> Result<()> {
    if !simulation.is_calculated() {
        return Err(SimulationError::NotCalculated(simulation.id.clone()));
    }

    let file = std::fs::File::create(path).map_err(|e| SimulationError::io(path, e))?;
    write_table(simulation, file, delimiter).map_err(|source| SimulationError::Export {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(id = %simulation.id, path = %path.display(), "Exported monthly results");
    Ok(())
}
