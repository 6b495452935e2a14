//! Text renderings of the widget's views.

use colored::Colorize;

use crate::chart::{Color, Palette, Wedge};
use crate::cli::output::current_preferences;
use crate::cli::ui::table_renderer::{Alignment, Table, TableColumn};
use crate::domain::ExpenseRecord;
use crate::form::{FormController, FormField};
use crate::stats::StatisticsView;

/// Category/amount table with the grand total as footer.
pub fn statistics_table(view: &StatisticsView) -> String {
    let mut table = Table::new(vec![
        TableColumn::new("Category", Alignment::Left),
        TableColumn::new("Amount", Alignment::Right),
    ]);
    match &view.empty_state {
        Some(message) => table.rows.push(vec![message.clone(), String::new()]),
        None => {
            table.rows = view
                .rows
                .iter()
                .map(|row| vec![row.category.to_string(), row.formatted_amount.clone()])
                .collect();
        }
    }
    table.footer = Some(vec!["Total".into(), view.grand_total_formatted.clone()]);
    table.render()
}

/// One line per wedge: swatch, category, share and angles in degrees.
pub fn chart_legend(
    wedges: &[Wedge],
    palette: &Palette,
    format: impl Fn(u64) -> String,
) -> String {
    let mut table = Table::new(vec![
        TableColumn::new("", Alignment::Left),
        TableColumn::new("Category", Alignment::Left),
        TableColumn::new("Amount", Alignment::Right),
        TableColumn::new("Share", Alignment::Right),
        TableColumn::new("Start", Alignment::Right),
        TableColumn::new("Span", Alignment::Right),
    ]);
    table.rows = wedges
        .iter()
        .map(|wedge| {
            vec![
                swatch(&palette.color_for(wedge.category)),
                wedge.category.to_string(),
                format(wedge.amount),
                format!("{:.1}%", wedge.fraction() * 100.0),
                format!("{:.1}°", wedge.start_degrees()),
                format!("{:.1}°", wedge.span_degrees()),
            ]
        })
        .collect();
    table.render()
}

/// Form fields with their current values. Flagged fields carry an error
/// marker and the focused field a cursor.
pub fn form_view(form: &FormController) -> String {
    let plain = current_preferences().plain_mode;
    let mut lines = Vec::new();
    for field in FormField::ALL {
        let cursor = if form.focus() == Some(field) { ">" } else { " " };
        let marker = if form.is_flagged(field) {
            if plain {
                "!".to_string()
            } else {
                "✖".red().to_string()
            }
        } else {
            " ".to_string()
        };
        let label = format!("{:<12}", field.label());
        let label = if form.is_flagged(field) && !plain {
            label.red().to_string()
        } else {
            label
        };
        lines.push(format!("{cursor}{marker} {label} {}", form.fields().get(field)));
    }
    lines.push(format!("  [{}]", form.submit_control().text()));
    lines.join("\n")
}

pub fn records_table(records: &[ExpenseRecord], format: impl Fn(u64) -> String) -> String {
    let mut table = Table::new(vec![
        TableColumn::new("ID", Alignment::Right),
        TableColumn::new("Date/Time", Alignment::Left),
        TableColumn::new("Category", Alignment::Left),
        TableColumn::new("Item", Alignment::Left),
        TableColumn::new("Amount", Alignment::Right),
        TableColumn::new("Description", Alignment::Left),
    ]);
    table.rows = records
        .iter()
        .map(|record| {
            vec![
                record.id.to_string(),
                record.date_time.clone(),
                record.category.to_string(),
                record.item.clone(),
                format(record.amount),
                record.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    table.render()
}

fn swatch(color: &Color) -> String {
    if current_preferences().plain_mode {
        return "#".to_string();
    }
    match color.rgb() {
        Some((r, g, b)) => "■".truecolor(r, g, b).to_string(),
        None => "■".to_string(),
    }
}
