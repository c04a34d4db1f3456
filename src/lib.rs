pub mod cli;
pub mod core;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::simulation::SimulationUpdate;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Operations available to the command line, already parsed.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Create {
        name: String,
        update: SimulationUpdate,
    },
    Update {
        id: String,
        update: SimulationUpdate,
    },
    Rename {
        id: String,
        name: String,
    },
    Delete {
        id: String,
    },
    List,
    Calculate {
        id: String,
    },
    Show {
        id: String,
    },
    Compare {
        ids: Vec<String>,
    },
    Export {
        id: String,
        path: PathBuf,
    },
    Save {
        id: String,
        path: PathBuf,
    },
    Load {
        path: PathBuf,
    },
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Investment simulator starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let mut session = cli::Session::open(&config)?;

    match command {
        AppCommand::Create { name, update } => cli::records::create(&mut session, &name, update),
        AppCommand::Update { id, update } => cli::records::update(&mut session, &id, update),
        AppCommand::Rename { id, name } => cli::records::rename(&mut session, &id, &name),
        AppCommand::Delete { id } => cli::records::delete(&mut session, &id),
        AppCommand::List => cli::records::list(&session),
        AppCommand::Calculate { id } => cli::results::calculate(&mut session, &id),
        AppCommand::Show { id } => cli::results::show(&session, &id),
        AppCommand::Compare { ids } => cli::compare::run(&session, &ids),
        AppCommand::Export { id, path } => cli::files::export(&session, &id, &path),
        AppCommand::Save { id, path } => cli::files::save(&session, &id, &path),
        AppCommand::Load { path } => cli::files::load(&mut session, &path),
    }
}
