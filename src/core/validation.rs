//! Business rules a simulation must satisfy before it can be calculated.

use crate::core::simulation::{RateMode, Simulation};

pub const MIN_TERM_MONTHS: u32 = 1;
pub const MAX_TERM_MONTHS: u32 = 360;
const RATE_RANGE_PERCENT: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// Outcome of validating a simulation. Holds every violated rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Checks all rules independently and reports every violation.
pub fn validate(simulation: &Simulation) -> ValidationReport {
    let mut errors = Vec::new();

    if simulation.name.trim().is_empty() {
        errors.push("Simulation name is required".to_string());
    }

    let initial = simulation.initial_contribution;
    if !(initial.is_finite() && initial > 0.0) {
        errors.push("Initial contribution must be greater than 0.00".to_string());
    }

    let monthly = simulation.monthly_contribution;
    if !(monthly.is_finite() && monthly >= 0.0) {
        errors.push("Monthly contribution cannot be negative".to_string());
    }

    let term_valid = (MIN_TERM_MONTHS..=MAX_TERM_MONTHS).contains(&simulation.term_months);
    if !term_valid {
        errors.push(format!(
            "Term must be between {MIN_TERM_MONTHS} and {MAX_TERM_MONTHS} months"
        ));
    }

    match simulation.rate_mode {
        RateMode::Fixed => match simulation.fixed_rate_percent {
            Some(rate) if RATE_RANGE_PERCENT.contains(&rate) => {}
            _ => errors.push("Fixed rate must be between 0% and 100%".to_string()),
        },
        RateMode::Variable => match simulation.variable_rates_percent.as_deref() {
            None | Some([]) => {
                errors.push("Variable rates are required for the variable rate mode".to_string())
            }
            Some(rates) => {
                if rates.len() != simulation.term_months as usize {
                    errors.push(format!(
                        "Variable rates must contain exactly {} entries, found {}",
                        simulation.term_months,
                        rates.len()
                    ));
                }
                for (i, rate) in rates.iter().enumerate() {
                    if !RATE_RANGE_PERCENT.contains(rate) {
                        errors.push(format!(
                            "Rate for month {} must be between 0% and 100% (got {rate})",
                            i + 1
                        ));
                    }
                }
            }
        },
    }

    ValidationReport { errors }
}
