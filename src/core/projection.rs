//! Month-by-month compound interest projection.
//!
//! Each month interest accrues on the running balance first, then the
//! monthly contribution is added. Month 1 therefore earns interest on the
//! initial contribution only. Values are kept in full `f64` precision;
//! rounding is left to whoever displays them.

use crate::core::error::{Result, SimulationError};
use crate::core::simulation::{MonthResult, RateMode, Simulation, SimulationOutcome};
use crate::core::validation::validate;
use tracing::debug;

/// Projects the balance trajectory of a simulation.
///
/// The simulation is validated first; an invalid one is refused with
/// [`SimulationError::InvalidRecord`] instead of being clamped into range.
/// The same error is returned when the balance grows past what `f64` holds.
pub fn project(simulation: &Simulation) -> Result<Vec<MonthResult>> {
    let report = validate(simulation);
    if !report.is_valid() {
        debug!(id = %simulation.id, errors = ?report.errors(), "Refusing to project invalid simulation");
        return Err(SimulationError::InvalidRecord(report.into_errors()));
    }

    let mut balance = simulation.initial_contribution;
    let mut cumulative_contributed = simulation.initial_contribution;
    let mut cumulative_interest = 0.0;
    let contribution = simulation.monthly_contribution;

    let mut results = Vec::with_capacity(simulation.term_months as usize);
    for month in 1..=simulation.term_months {
        let rate = monthly_rate(simulation, month);

        let interest = balance * rate;
        balance += interest;
        cumulative_interest += interest;

        balance += contribution;
        cumulative_contributed += contribution;

        if !(balance.is_finite() && cumulative_interest.is_finite()) {
            debug!(id = %simulation.id, month, "Projection left the f64 range");
            return Err(SimulationError::InvalidRecord(vec![format!(
                "Projected balance exceeds the representable range in month {month}"
            )]));
        }

        results.push(MonthResult {
            month_index: month,
            contribution_this_month: contribution,
            cumulative_contributed,
            interest_this_month: interest,
            cumulative_interest,
            ending_balance: balance,
        });
    }

    debug!(
        id = %simulation.id,
        months = results.len(),
        final_balance = balance,
        "Projection complete"
    );
    Ok(results)
}

/// Decimal rate applied in 1-based `month`.
///
/// A variable rate list shorter than the term repeats its last rate.
fn monthly_rate(simulation: &Simulation, month: u32) -> f64 {
    let percent = match simulation.rate_mode {
        RateMode::Fixed => simulation.fixed_rate_percent.unwrap_or(0.0),
        RateMode::Variable => simulation
            .variable_rates_percent
            .as_deref()
            .and_then(|rates| {
                let index = (month as usize - 1).min(rates.len().saturating_sub(1));
                rates.get(index).copied()
            })
            .unwrap_or(0.0),
    };
    percent / 100.0
}

/// Percentage gain of the final balance over everything contributed.
pub fn profitability_percent(final_balance: f64, total_contributed: f64) -> Option<f64> {
    if total_contributed == 0.0 {
        return None;
    }
    Some((final_balance / total_contributed - 1.0) * 100.0)
}

/// Headline figures taken from the last month of a projection.
pub fn outcome(results: &[MonthResult]) -> Option<SimulationOutcome> {
    let last = results.last()?;
    let profitability = profitability_percent(last.ending_balance, last.cumulative_contributed)?;
    Some(SimulationOutcome {
        final_balance: last.ending_balance,
        total_contributed: last.cumulative_contributed,
        total_interest: last.cumulative_interest,
        profitability_percent: profitability,
        months: results.len(),
    })
}
