//! Simulation records and the plain data types built around them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Whether the monthly interest rate is constant or supplied per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateMode {
    Fixed,
    Variable,
}

impl Display for RateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RateMode::Fixed => "fixed",
                RateMode::Variable => "variable",
            }
        )
    }
}

impl FromStr for RateMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(RateMode::Fixed),
            "variable" => Ok(RateMode::Variable),
            _ => Err(anyhow::anyhow!("Invalid rate mode: {}", s)),
        }
    }
}

/// The financial state of a simulation at the end of one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthResult {
    pub month_index: u32,
    pub contribution_this_month: f64,
    pub cumulative_contributed: f64,
    pub interest_this_month: f64,
    pub cumulative_interest: f64,
    pub ending_balance: f64,
}

/// One audited field change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub at: DateTime<Utc>,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}

/// A simulation's parameters plus its computed trajectory.
///
/// `monthly_results` is either empty or holds exactly `term_months` entries
/// computed from the current parameters. The record store clears it on
/// every parameter edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub initial_contribution: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    pub term_months: u32,
    pub rate_mode: RateMode,
    #[serde(default)]
    pub fixed_rate_percent: Option<f64>,
    #[serde(default)]
    pub variable_rates_percent: Option<Vec<f64>>,
    #[serde(default)]
    pub monthly_results: Vec<MonthResult>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default)]
    pub change_log: Vec<ChangeLogEntry>,
}

impl Simulation {
    pub fn is_calculated(&self) -> bool {
        !self.monthly_results.is_empty()
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            term_months: self.term_months,
            created_at: self.created_at,
            has_results: self.is_calculated(),
        }
    }

    /// Marks the record as mutated at `at`.
    pub(crate) fn touch(&mut self, at: DateTime<Utc>) {
        self.modified_at = at;
    }

    pub(crate) fn log_change(
        &mut self,
        at: DateTime<Utc>,
        field: &str,
        old_value: String,
        new_value: String,
    ) {
        self.change_log.push(ChangeLogEntry {
            at,
            field: field.to_string(),
            old_value,
            new_value,
        });
    }
}

/// Row returned by the store's listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub id: String,
    pub name: String,
    pub term_months: u32,
    pub created_at: DateTime<Utc>,
    pub has_results: bool,
}

/// Partial update of a simulation's parameters. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationUpdate {
    pub name: Option<String>,
    pub initial_contribution: Option<f64>,
    pub monthly_contribution: Option<f64>,
    pub term_months: Option<u32>,
    pub rate_mode: Option<RateMode>,
    pub fixed_rate_percent: Option<f64>,
    pub variable_rates_percent: Option<Vec<f64>>,
}

impl SimulationUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Sets a fixed monthly rate, switching the rate mode accordingly.
    pub fn fixed_rate(rate_percent: f64) -> Self {
        Self {
            rate_mode: Some(RateMode::Fixed),
            fixed_rate_percent: Some(rate_percent),
            ..Self::default()
        }
    }

    /// Sets per-month rates, switching the rate mode accordingly.
    pub fn variable_rates(rates_percent: Vec<f64>) -> Self {
        Self {
            rate_mode: Some(RateMode::Variable),
            variable_rates_percent: Some(rates_percent),
            ..Self::default()
        }
    }

    pub fn contributions(initial: f64, monthly: f64) -> Self {
        Self {
            initial_contribution: Some(initial),
            monthly_contribution: Some(monthly),
            ..Self::default()
        }
    }
}

/// Headline figures of a calculated simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub final_balance: f64,
    pub total_contributed: f64,
    pub total_interest: f64,
    pub profitability_percent: f64,
    pub months: usize,
}
