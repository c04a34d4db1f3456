use super::{Session, ui};
use crate::core::simulation::{RateMode, Simulation};
use crate::core::validation::validate;
use anyhow::Result;
use comfy_table::Cell;

pub fn calculate(session: &mut Session, id: &str) -> Result<()> {
    session.store.calculate(id)?;
    session.persist(id)?;

    let simulation = session.store.get(id)?;
    println!("{}", ui::month_table(&simulation.monthly_results));
    if let Some(outcome) = session.store.outcome(id)? {
        println!("\n{}", ui::outcome_lines(&outcome));
    }
    Ok(())
}

pub fn show(session: &Session, id: &str) -> Result<()> {
    let simulation = session.store.get(id)?;
    println!(
        "Simulation: {} ({})\n",
        ui::style_text(&simulation.name, ui::StyleType::Title),
        simulation.id
    );
    println!("{}", parameter_table(simulation));

    let report = validate(simulation);
    if !report.is_valid() {
        println!("\nThis simulation cannot be calculated:");
        ui::print_errors(report.errors());
    }

    match session.store.outcome(id)? {
        Some(outcome) => {
            ui::print_separator();
            println!("{}", ui::month_table(&simulation.monthly_results));
            println!("\n{}", ui::outcome_lines(&outcome));
        }
        None => println!(
            "\n{}",
            ui::style_text("Not calculated yet.", ui::StyleType::Subtle)
        ),
    }
    Ok(())
}

fn parameter_table(simulation: &Simulation) -> comfy_table::Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Parameter"), ui::header_cell("Value")]);

    let rates = match simulation.rate_mode {
        RateMode::Fixed => ui::format_optional_cell(simulation.fixed_rate_percent, |r| {
            format!("{r:.2}% / month")
        }),
        RateMode::Variable => {
            ui::format_optional_cell(simulation.variable_rates_percent.as_ref(), |rates| {
                rates
                    .iter()
                    .map(|r| format!("{r}%"))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
        }
    };

    table.add_row(vec![
        Cell::new("Initial contribution"),
        ui::money_cell(simulation.initial_contribution),
    ]);
    table.add_row(vec![
        Cell::new("Monthly contribution"),
        ui::money_cell(simulation.monthly_contribution),
    ]);
    table.add_row(vec![
        Cell::new("Term (months)"),
        Cell::new(simulation.term_months),
    ]);
    table.add_row(vec![Cell::new("Rate mode"), Cell::new(simulation.rate_mode)]);
    table.add_row(vec![Cell::new("Rates"), rates]);
    table.add_row(vec![
        Cell::new("Last modified"),
        Cell::new(simulation.modified_at.format("%Y-%m-%d %H:%M:%S")),
    ]);
    table
}
