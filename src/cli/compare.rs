use super::{Session, ui};
use crate::core::comparison::Comparison;
use anyhow::Result;
use comfy_table::{Attribute, Cell};

impl Comparison {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("ID"),
            ui::header_cell("Name"),
            ui::header_cell("Term"),
            ui::header_cell("Invested"),
            ui::header_cell("Interest"),
            ui::header_cell("Final Balance"),
            ui::header_cell("Profitability"),
        ]);

        let best_id = self.best_by_profitability().map(|e| e.id.as_str());
        for entry in self.entries() {
            let mut name = Cell::new(&entry.name);
            if Some(entry.id.as_str()) == best_id {
                name = name.add_attribute(Attribute::Bold);
            }
            table.add_row(vec![
                Cell::new(&entry.id),
                name,
                Cell::new(entry.term_months),
                ui::money_cell(entry.total_contributed),
                ui::money_cell(entry.total_interest),
                ui::money_cell(entry.final_balance),
                ui::change_cell(entry.profitability_percent),
            ]);
        }

        let mut output = table.to_string();
        if let Some(best) = self.best_by_profitability() {
            output.push_str(&format!(
                "\n\n{}: {} ({:.2}%)",
                ui::style_text("Best profitability", ui::StyleType::TotalLabel),
                ui::style_text(&best.name, ui::StyleType::TotalValue),
                best.profitability_percent
            ));
        }
        if let Some(best) = self.best_by_final_balance() {
            output.push_str(&format!(
                "\n{}: {} ({:.2})",
                ui::style_text("Best final balance", ui::StyleType::TotalLabel),
                ui::style_text(&best.name, ui::StyleType::TotalValue),
                best.final_balance
            ));
        }
        output
    }
}

pub fn run(session: &Session, ids: &[String]) -> Result<()> {
    let comparison = session.store.compare(ids)?;
    println!("{}", comparison.display_as_table());
    Ok(())
}
