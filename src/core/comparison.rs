//! Ranks calculated simulations against each other.

use crate::core::error::{Result, SimulationError};
use crate::core::projection::outcome;
use crate::core::simulation::Simulation;
use serde::Serialize;
use tracing::debug;

pub const MIN_COMPARED: usize = 2;

/// Metrics of one simulation taking part in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub id: String,
    pub name: String,
    pub final_balance: f64,
    pub total_contributed: f64,
    pub total_interest: f64,
    pub profitability_percent: f64,
    pub term_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    entries: Vec<ComparisonEntry>,
}

impl Comparison {
    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn best_by_profitability(&self) -> Option<&ComparisonEntry> {
        first_max_by(&self.entries, |e| e.profitability_percent)
    }

    pub fn best_by_final_balance(&self) -> Option<&ComparisonEntry> {
        first_max_by(&self.entries, |e| e.final_balance)
    }
}

/// Builds a comparison from the calculated simulations among `simulations`.
///
/// Uncalculated simulations are skipped. Fails unless at least
/// [`MIN_COMPARED`] calculated ones remain.
pub fn compare<'a, I>(simulations: I) -> Result<Comparison>
where
    I: IntoIterator<Item = &'a Simulation>,
{
    let mut entries = Vec::new();
    for simulation in simulations {
        let Some(summary) = outcome(&simulation.monthly_results) else {
            debug!(id = %simulation.id, "Skipping uncalculated simulation in comparison");
            continue;
        };
        entries.push(ComparisonEntry {
            id: simulation.id.clone(),
            name: simulation.name.clone(),
            final_balance: summary.final_balance,
            total_contributed: summary.total_contributed,
            total_interest: summary.total_interest,
            profitability_percent: summary.profitability_percent,
            term_months: simulation.term_months,
        });
    }

    if entries.len() < MIN_COMPARED {
        return Err(SimulationError::InsufficientRecords {
            found: entries.len(),
            required: MIN_COMPARED,
        });
    }

    debug!(count = entries.len(), "Comparison built");
    Ok(Comparison { entries })
}

/// Max by key where ties keep the earliest entry.
fn first_max_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<&T> = None;
    for item in items {
        match best {
            Some(current) if key(item) <= key(current) => {}
            _ => best = Some(item),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::projection::project;
    use crate::core::simulation::RateMode;
    use chrono::Utc;

    fn calculated(id: &str, initial: f64, monthly: f64, rate: f64) -> Simulation {
        let now = Utc::now();
        let mut sim = Simulation {
            id: id.to_string(),
            name: format!("Plan {id}"),
            initial_contribution: initial,
            monthly_contribution: monthly,
            term_months: 12,
            rate_mode: RateMode::Fixed,
            fixed_rate_percent: Some(rate),
            variable_rates_percent: None,
            monthly_results: Vec::new(),
            created_at: now,
            modified_at: now,
            change_log: Vec::new(),
        };
        sim.monthly_results = project(&sim).unwrap();
        sim
    }

    #[test]
    fn test_best_performers() {
        let small_high_rate = calculated("SIM0001", 1000.0, 0.0, 2.0);
        let large_low_rate = calculated("SIM0002", 50_000.0, 0.0, 0.5);

        let comparison = compare([&small_high_rate, &large_low_rate]).unwrap();
        assert_eq!(comparison.entries().len(), 2);
        assert_eq!(comparison.best_by_profitability().unwrap().id, "SIM0001");
        assert_eq!(comparison.best_by_final_balance().unwrap().id, "SIM0002");
    }

    #[test]
    fn test_ties_keep_first_encountered() {
        let first = calculated("SIM0001", 1000.0, 0.0, 1.0);
        let second = calculated("SIM0002", 1000.0, 0.0, 1.0);

        let comparison = compare([&second, &first]).unwrap();
        assert_eq!(comparison.best_by_profitability().unwrap().id, "SIM0002");
        assert_eq!(comparison.best_by_final_balance().unwrap().id, "SIM0002");
    }

    #[test]
    fn test_uncalculated_simulations_do_not_count() {
        let done = calculated("SIM0001", 1000.0, 0.0, 1.0);
        let mut pending = calculated("SIM0002", 1000.0, 0.0, 1.0);
        pending.monthly_results.clear();

        match compare([&done, &pending]) {
            Err(SimulationError::InsufficientRecords { found, required }) => {
                assert_eq!(found, 1);
                assert_eq!(required, 2);
            }
            other => panic!("Expected InsufficientRecords, got {other:?}"),
        }
    }

    #[test]
    fn test_entry_metrics() {
        let sim = calculated("SIM0001", 1000.0, 100.0, 1.0);
        let other = calculated("SIM0002", 1000.0, 0.0, 1.0);
        let comparison = compare([&sim, &other]).unwrap();

        let entry = &comparison.entries()[0];
        assert_eq!(entry.term_months, 12);
        assert!((entry.total_contributed - 2200.0).abs() < 1e-9);
        assert!(
            (entry.final_balance - entry.total_contributed - entry.total_interest).abs() < 1e-6
        );
    }
}
