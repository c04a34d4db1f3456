pub mod disk;
pub mod memory;

use crate::core::config::IdConfig;

pub use disk::Workspace;
pub use memory::RecordStore;

/// Allocates record ids for a store.
pub trait IdSource {
    /// Returns the next id. The store refuses an id it already holds.
    fn next_id(&mut self) -> String;

    /// Reports an id that entered the store from elsewhere, so later
    /// allocations cannot collide with it.
    fn observe(&mut self, id: &str);
}

/// Sequential ids of the form `<prefix><zero padded counter>`, e.g. `SIM0001`.
///
/// The counter saturates at `u64::MAX`; ids whose number has no successor
/// are treated as foreign by [`IdSource::observe`].
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    width: usize,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width,
            next: 1,
        }
    }

    fn sequence_of(&self, id: &str) -> Option<u64> {
        id.strip_prefix(&self.prefix)?.parse().ok()
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::from(&IdConfig::default())
    }
}

impl From<&IdConfig> for SequentialIds {
    fn from(config: &IdConfig) -> Self {
        Self::new(config.prefix.clone(), config.width)
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{:0width$}", self.prefix, self.next, width = self.width);
        self.next = self.next.saturating_add(1);
        id
    }

    fn observe(&mut self, id: &str) {
        let successor = self.sequence_of(id).and_then(|seq| seq.checked_add(1));
        if let Some(successor) = successor {
            self.next = self.next.max(successor);
        }
    }
}
