use super::Session;
use crate::core::export::export_to_path;
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn export(session: &Session, id: &str, path: &Path) -> Result<()> {
    let simulation = session.store.get(id)?;
    export_to_path(simulation, path, session.delimiter())?;
    info!("Exported simulation {id} to {}", path.display());
    println!("Exported {} months to {}", simulation.monthly_results.len(), path.display());
    Ok(())
}

pub fn save(session: &Session, id: &str, path: &Path) -> Result<()> {
    session.store.save(id, path)?;
    println!("Simulation {id} saved to {}", path.display());
    Ok(())
}

/// Loads a simulation file and adds it to the workspace.
pub fn load(session: &mut Session, path: &Path) -> Result<()> {
    let id = session.store.load(path)?;
    session.persist(&id)?;
    println!("Loaded simulation {id} from {}", path.display());
    Ok(())
}
