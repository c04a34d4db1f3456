use crate::core::simulation::{MonthResult, SimulationOutcome};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "N/A".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Right aligned monetary value with two decimals.
pub fn money_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right)
}

/// Creates a cell for displaying a percentage gain with color coding.
pub fn change_cell(change: f64) -> Cell {
    let text = format!("{change:.2}%");
    if change >= 0.0 {
        Cell::new(text)
            .fg(Color::Green)
            .set_alignment(CellAlignment::Right)
    } else {
        Cell::new(text)
            .fg(Color::Red)
            .set_alignment(CellAlignment::Right)
    }
}

/// Month-by-month table of a projection.
pub fn month_table(results: &[MonthResult]) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Month"),
        header_cell("Contribution"),
        header_cell("Total Invested"),
        header_cell("Interest"),
        header_cell("Total Interest"),
        header_cell("Balance"),
    ]);

    for month in results {
        table.add_row(vec![
            Cell::new(month.month_index).set_alignment(CellAlignment::Right),
            money_cell(month.contribution_this_month),
            money_cell(month.cumulative_contributed),
            money_cell(month.interest_this_month),
            money_cell(month.cumulative_interest),
            money_cell(month.ending_balance),
        ]);
    }
    table
}

/// Headline lines for a calculated simulation.
pub fn outcome_lines(outcome: &SimulationOutcome) -> String {
    let rows = [
        ("Final balance", format!("{:.2}", outcome.final_balance)),
        ("Total invested", format!("{:.2}", outcome.total_contributed)),
        ("Total interest", format!("{:.2}", outcome.total_interest)),
        (
            "Profitability",
            format!("{:.2}%", outcome.profitability_percent),
        ),
        ("Months", outcome.months.to_string()),
    ];

    rows.iter()
        .map(|(label, value)| {
            format!(
                "{}: {}",
                style_text(label, StyleType::TotalLabel),
                style_text(value, StyleType::TotalValue)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints each error on its own line.
pub fn print_errors(errors: &[String]) {
    for error in errors {
        println!("  - {}", style_text(error, StyleType::Error));
    }
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}
