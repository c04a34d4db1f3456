//! Command handlers over a workspace-backed record store.

pub mod compare;
pub mod files;
pub mod records;
pub mod results;
pub mod setup;
pub mod ui;

use crate::core::config::AppConfig;
use crate::store::{RecordStore, Workspace};
use anyhow::{Context, Result};
use tracing::debug;

/// The record store of one CLI invocation, mirrored to the workspace directory.
pub struct Session {
    pub store: RecordStore,
    workspace: Workspace,
    delimiter: u8,
}

impl Session {
    pub fn open(config: &AppConfig) -> Result<Self> {
        let workspace = Workspace::new(config.data_path()?);
        let mut store = RecordStore::with_config(config);
        let count = workspace.load_into(&mut store).with_context(|| {
            format!("Failed to open workspace: {}", workspace.root().display())
        })?;
        debug!("Opened workspace with {count} simulations");

        Ok(Self {
            store,
            workspace,
            delimiter: config.export.delimiter_byte()?,
        })
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Writes simulation `id` back to the workspace.
    pub fn persist(&self, id: &str) -> Result<()> {
        self.workspace
            .persist(&self.store, id)
            .with_context(|| format!("Failed to persist simulation {id}"))
    }

    pub fn forget(&self, id: &str) -> Result<()> {
        self.workspace
            .remove(id)
            .with_context(|| format!("Failed to remove simulation {id} from workspace"))
    }
}
