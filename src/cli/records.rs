use super::{Session, ui};
use crate::core::simulation::SimulationUpdate;
use anyhow::{Result, bail};
use comfy_table::Cell;
use tracing::info;

pub fn create(session: &mut Session, name: &str, update: SimulationUpdate) -> Result<()> {
    let id = session.store.create(name)?;
    println!(
        "Created simulation {} ({})",
        ui::style_text(&id, ui::StyleType::Title),
        name.trim()
    );

    if update.is_empty() {
        return session.persist(&id);
    }
    apply(session, &id, update)
}

pub fn update(session: &mut Session, id: &str, update: SimulationUpdate) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to update for simulation {id}");
    }
    apply(session, id, update)
}

/// Applies an update and persists the result, valid or not.
fn apply(session: &mut Session, id: &str, update: SimulationUpdate) -> Result<()> {
    let report = session.store.update(id, update)?;
    session.persist(id)?;

    if !report.is_valid() {
        println!("Simulation {id} is not valid:");
        ui::print_errors(report.errors());
        bail!(
            "Simulation {id} has {} validation error(s)",
            report.errors().len()
        );
    }

    info!("Simulation {id} updated");
    println!("Simulation {id} updated");
    Ok(())
}

pub fn rename(session: &mut Session, id: &str, name: &str) -> Result<()> {
    session.store.rename(id, name)?;
    session.persist(id)?;
    println!("Simulation {id} renamed to '{}'", name.trim());
    Ok(())
}

pub fn delete(session: &mut Session, id: &str) -> Result<()> {
    let removed = session.store.delete(id)?;
    session.forget(id)?;
    println!("Deleted simulation {id} ({})", removed.name);
    Ok(())
}

pub fn list(session: &Session) -> Result<()> {
    let summaries = session.store.list();
    if summaries.is_empty() {
        println!("No simulations found.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Name"),
        ui::header_cell("Term (months)"),
        ui::header_cell("Created"),
        ui::header_cell("Calculated"),
    ]);

    for summary in &summaries {
        let created = summary.created_at.format("%Y-%m-%d %H:%M").to_string();
        table.add_row(vec![
            Cell::new(&summary.id),
            Cell::new(&summary.name),
            Cell::new(summary.term_months),
            Cell::new(ui::style_text(&created, ui::StyleType::Subtle)),
            Cell::new(if summary.has_results { "yes" } else { "no" }),
        ]);
    }

    println!("{table}");
    Ok(())
}
