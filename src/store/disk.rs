//! JSON persistence of simulations.

use super::RecordStore;
use crate::core::error::{Result, SimulationError};
use crate::core::simulation::Simulation;
use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Writes a simulation as pretty JSON.
///
/// The content goes to a temporary file next to `path` that is renamed over
/// it once complete, so `path` never holds a partial record.
pub fn write_record(simulation: &Simulation, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir).map_err(|e| SimulationError::io(path, e))?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, simulation).map_err(|source| {
            SimulationError::Format {
                path: path.to_path_buf(),
                source,
            }
        })?;
        writer.flush().map_err(|e| SimulationError::io(path, e))?;
    }
    temp.persist(path)
        .map_err(|e| SimulationError::io(path, e.error))?;

    debug!(id = %simulation.id, path = %path.display(), "Simulation written");
    Ok(())
}

pub fn read_record(path: &Path) -> Result<Simulation> {
    let file = fs::File::open(path).map_err(|e| SimulationError::io(path, e))?;
    let simulation = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        SimulationError::Format {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), "Simulation read");
    Ok(simulation)
}

/// Ids of deleted simulations, one per line, kept so they are never reissued.
const RETIRED_IDS_FILE: &str = "retired_ids";

/// A directory holding one `<id>.json` file per simulation.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Loads every simulation file into `store`.
    ///
    /// Every file is read before any is inserted, and files named after
    /// their own id go first. A file whose id is already loaded is skipped
    /// with a warning and left on disk; any other file not named `<id>.json`
    /// is moved there. Ids of deleted records stay reserved. Unreadable files
    /// are skipped with a warning. Returns how many were loaded.
    pub fn load_into(&self, store: &mut RecordStore) -> Result<usize> {
        fs::create_dir_all(&self.root).map_err(|e| SimulationError::io(&self.root, e))?;

        for id in self.retired_ids()? {
            store.reserve_id(&id);
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.root)
            .map_err(|e| SimulationError::io(&self.root, e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            // Fresh ids must not land on a file name, readable or not.
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                store.reserve_id(stem);
            }
            match read_record(&path) {
                Ok(simulation) => records.push((path, simulation)),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }
        records.sort_by_key(|(path, simulation)| self.load_rank(path, simulation));

        let mut loaded = 0;
        for (path, simulation) in records {
            if store.contains(&simulation.id) {
                warn!(
                    "Skipping {}: simulation {} is already loaded",
                    path.display(),
                    simulation.id
                );
                continue;
            }

            let id = store.insert_loaded(simulation)?;
            let target = self.record_path(&id);
            if target != path {
                if target.exists() {
                    store.delete(&id)?;
                    warn!("Skipping {}: {} is taken", path.display(), target.display());
                    continue;
                }
                store.save(&id, &target)?;
                fs::remove_file(&path).map_err(|e| SimulationError::io(&path, e))?;
                debug!(from = %path.display(), to = %target.display(), "Simulation file moved");
            }
            loaded += 1;
        }
        debug!(count = loaded, root = %self.root.display(), "Workspace loaded");
        Ok(loaded)
    }

    /// Files named after their id, then other files with an id, then files
    /// without one.
    fn load_rank(&self, path: &Path, simulation: &Simulation) -> u8 {
        if simulation.id.trim().is_empty() {
            2
        } else if self.record_path(&simulation.id) == path {
            0
        } else {
            1
        }
    }

    /// Writes the current state of simulation `id` to its file.
    pub fn persist(&self, store: &RecordStore, id: &str) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| SimulationError::io(&self.root, e))?;
        store.save(id, &self.record_path(id))
    }

    /// Deletes the file of simulation `id` and retires the id.
    pub fn remove(&self, id: &str) -> Result<()> {
        let path = self.record_path(id);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| SimulationError::io(&path, e))?;
        }

        let retired = self.root.join(RETIRED_IDS_FILE);
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&retired)
            .map_err(|e| SimulationError::io(&retired, e))?;
        writeln!(file, "{id}").map_err(|e| SimulationError::io(&retired, e))?;
        debug!(%id, "Simulation id retired");
        Ok(())
    }

    fn retired_ids(&self) -> Result<Vec<String>> {
        let path = self.root.join(RETIRED_IDS_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SimulationError::io(&path, e)),
        };
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
