//! In-memory record store, the single owner of every simulation.

use super::{IdSource, SequentialIds, disk};
use crate::core::comparison::{self, Comparison};
use crate::core::config::{AppConfig, SimulationDefaults};
use crate::core::error::{Result, SimulationError};
use crate::core::projection::{self, project};
use crate::core::simulation::{
    MonthResult, RateMode, Simulation, SimulationOutcome, SimulationSummary, SimulationUpdate,
};
use crate::core::validation::{ValidationReport, validate};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

const NAME_REQUIRED: &str = "Simulation name is required";

/// Keyed collection of simulations with id allocation, CRUD and persistence.
///
/// Listing follows insertion order.
pub struct RecordStore {
    records: HashMap<String, Simulation>,
    order: Vec<String>,
    ids: Box<dyn IdSource>,
    defaults: SimulationDefaults,
}

impl RecordStore {
    pub fn new(ids: Box<dyn IdSource>, defaults: SimulationDefaults) -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
            ids,
            defaults,
        }
    }

    pub fn with_config(config: &AppConfig) -> Self {
        Self::new(
            Box::new(SequentialIds::from(&config.ids)),
            config.defaults.clone(),
        )
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Creates a simulation with the configured defaults and returns its id.
    pub fn create(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SimulationError::Validation(vec![NAME_REQUIRED.to_string()]));
        }

        let id = self.fresh_id()?;
        let now = Utc::now();
        let simulation = Simulation {
            id,
            name: name.to_string(),
            initial_contribution: self.defaults.initial_contribution,
            monthly_contribution: self.defaults.monthly_contribution,
            term_months: self.defaults.term_months,
            rate_mode: self.defaults.rate_mode,
            fixed_rate_percent: self.defaults.fixed_rate_percent,
            variable_rates_percent: None,
            monthly_results: Vec::new(),
            created_at: now,
            modified_at: now,
            change_log: Vec::new(),
        };

        let id = simulation.id.clone();
        info!("Simulation '{}' created with id {}", name, id);
        self.insert(simulation);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Result<&Simulation> {
        self.records
            .get(id)
            .ok_or_else(|| SimulationError::NotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Simulation> {
        self.records
            .get_mut(id)
            .ok_or_else(|| SimulationError::NotFound(id.to_string()))
    }

    /// Applies every provided field, then validates.
    ///
    /// Results are cleared and the fields stay applied even when validation
    /// fails; the returned report lists every violated rule.
    pub fn update(&mut self, id: &str, update: SimulationUpdate) -> Result<ValidationReport> {
        let now = Utc::now();
        let simulation = self.get_mut(id)?;

        let mut changes = Changes::default();
        if let Some(name) = update.name {
            changes.apply(&mut simulation.name, name.trim().to_string(), "name");
        }
        if let Some(initial) = update.initial_contribution {
            changes.apply(
                &mut simulation.initial_contribution,
                initial,
                "initial_contribution",
            );
        }
        if let Some(monthly) = update.monthly_contribution {
            changes.apply(
                &mut simulation.monthly_contribution,
                monthly,
                "monthly_contribution",
            );
        }
        if let Some(term) = update.term_months {
            changes.apply(&mut simulation.term_months, term, "term_months");
        }
        if let Some(mode) = update.rate_mode {
            changes.apply(&mut simulation.rate_mode, mode, "rate_mode");
        }
        if let Some(rate) = update.fixed_rate_percent {
            changes.apply(
                &mut simulation.fixed_rate_percent,
                Some(rate),
                "fixed_rate_percent",
            );
        }
        if let Some(rates) = update.variable_rates_percent {
            changes.apply(
                &mut simulation.variable_rates_percent,
                Some(rates),
                "variable_rates_percent",
            );
        }

        changes.record(simulation, now);
        simulation.monthly_results.clear();
        simulation.touch(now);

        let report = validate(simulation);
        if report.is_valid() {
            info!("Simulation {} configured", id);
        } else {
            debug!(%id, errors = ?report.errors(), "Simulation left invalid after update");
        }
        Ok(report)
    }

    /// Changes only the display name. Results are kept.
    pub fn rename(&mut self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        let now = Utc::now();
        let simulation = self.get_mut(id)?;
        if name.is_empty() {
            return Err(SimulationError::Validation(vec![NAME_REQUIRED.to_string()]));
        }

        let mut changes = Changes::default();
        changes.apply(&mut simulation.name, name.to_string(), "name");
        changes.record(simulation, now);
        simulation.touch(now);
        info!("Simulation {} renamed to '{}'", id, name);
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Simulation> {
        let simulation = self
            .records
            .remove(id)
            .ok_or_else(|| SimulationError::NotFound(id.to_string()))?;
        self.order.retain(|existing| existing != id);
        info!("Simulation {} deleted", id);
        Ok(simulation)
    }

    pub fn list(&self) -> Vec<SimulationSummary> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .map(Simulation::summary)
            .collect()
    }

    /// Projects the simulation and stores the results on it.
    pub fn calculate(&mut self, id: &str) -> Result<&[MonthResult]> {
        let simulation = self.get_mut(id)?;
        let results = project(simulation)?;
        simulation.monthly_results = results;
        simulation.touch(Utc::now());
        info!(
            "Simulation {} calculated over {} months",
            id,
            simulation.monthly_results.len()
        );
        Ok(&simulation.monthly_results)
    }

    /// Headline figures, or `None` when the simulation is not calculated.
    pub fn outcome(&self, id: &str) -> Result<Option<SimulationOutcome>> {
        Ok(projection::outcome(&self.get(id)?.monthly_results))
    }

    /// Compares the calculated simulations among `ids`.
    ///
    /// Every id must exist; uncalculated ones are left out of the ranking.
    pub fn compare<S: AsRef<str>>(&self, ids: &[S]) -> Result<Comparison> {
        let simulations = ids
            .iter()
            .map(|id| self.get(id.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        comparison::compare(simulations)
    }

    pub fn save(&self, id: &str, path: &Path) -> Result<()> {
        disk::write_record(self.get(id)?, path)
    }

    /// Reads a simulation file into the store and returns its id.
    pub fn load(&mut self, path: &Path) -> Result<String> {
        let simulation = disk::read_record(path)?;
        self.insert_loaded(simulation)
    }

    /// Adds a simulation coming from outside the store.
    ///
    /// The embedded id is kept when it is free; an empty or taken id is
    /// replaced by a fresh one.
    pub fn insert_loaded(&mut self, mut simulation: Simulation) -> Result<String> {
        if simulation.id.trim().is_empty() || self.records.contains_key(&simulation.id) {
            let fresh = self.fresh_id()?;
            debug!(old = %simulation.id, new = %fresh, "Assigning fresh id to loaded simulation");
            simulation.id = fresh;
        } else {
            self.ids.observe(&simulation.id);
        }

        if simulation.is_calculated()
            && simulation.monthly_results.len() != simulation.term_months as usize
        {
            debug!(id = %simulation.id, "Dropping results inconsistent with the term");
            simulation.monthly_results.clear();
        }

        let id = simulation.id.clone();
        info!("Simulation loaded: {} - {}", id, simulation.name);
        self.insert(simulation);
        Ok(id)
    }

    /// Keeps `id` from being allocated later, e.g. the id of a deleted record.
    pub fn reserve_id(&mut self, id: &str) {
        self.ids.observe(id);
    }

    fn fresh_id(&mut self) -> Result<String> {
        let id = self.ids.next_id();
        if self.records.contains_key(&id) {
            return Err(SimulationError::IdConflict(id));
        }
        Ok(id)
    }

    fn insert(&mut self, simulation: Simulation) {
        self.order.push(simulation.id.clone());
        self.records.insert(simulation.id.clone(), simulation);
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(
            Box::new(SequentialIds::default()),
            SimulationDefaults::default(),
        )
    }
}

/// Field changes collected during one update, written to the change log.
#[derive(Default)]
struct Changes(Vec<(&'static str, String, String)>);

impl Changes {
    fn apply<T: LogValue + PartialEq>(&mut self, slot: &mut T, value: T, field: &'static str) {
        if *slot != value {
            self.0.push((field, slot.log_value(), value.log_value()));
            *slot = value;
        }
    }

    fn record(self, simulation: &mut Simulation, at: DateTime<Utc>) {
        for (field, old_value, new_value) in self.0 {
            debug!(id = %simulation.id, field, %old_value, %new_value, "Field changed");
            simulation.log_change(at, field, old_value, new_value);
        }
    }
}

/// Text form of a field value in the change log.
trait LogValue {
    fn log_value(&self) -> String;
}

macro_rules! display_log_value {
    ($($ty:ty),*) => {
        $(impl LogValue for $ty {
            fn log_value(&self) -> String {
                self.to_string()
            }
        })*
    };
}

display_log_value!(String, f64, u32, RateMode);

impl LogValue for Vec<f64> {
    fn log_value(&self) -> String {
        let rates: Vec<String> = self.iter().map(f64::to_string).collect();
        format!("[{}]", rates.join(", "))
    }
}

impl<T: LogValue> LogValue for Option<T> {
    fn log_value(&self) -> String {
        self.as_ref().map_or("none".to_string(), LogValue::log_value)
    }
}
