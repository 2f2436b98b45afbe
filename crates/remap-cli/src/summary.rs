use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use remap_cli::handlers::Preview;
use remap_map::MappingSummary;

/// Numbered list of the configured canonical columns.
pub fn columns_table(columns: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Expected column")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, column) in columns.iter().enumerate() {
        table.add_row(vec![dim_cell(idx + 1), Cell::new(column)]);
    }
    table
}

pub fn print_preview(preview: &Preview) {
    println!("File: {}", preview.filename);
    println!(
        "Rows: {} (showing {})",
        preview.total_rows,
        preview.rows.len()
    );
    println!("{}", rows_table(preview));
    println!("{}", slots_table(preview));
}

/// Header plus the first rows of the upload; empty cells are dimmed.
pub fn rows_table(preview: &Preview) -> Table {
    let mut table = Table::new();
    table.set_header(preview.columns.iter().map(|c| header_cell(c)));
    apply_table_style(&mut table);
    for row in &preview.rows {
        table.add_row(row.iter().map(|value| {
            if value.is_empty() {
                dim_cell("(empty)")
            } else {
                Cell::new(value)
            }
        }));
    }
    table
}

/// One line per canonical column with the source columns it may take.
pub fn slots_table(preview: &Preview) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Expected column"),
        header_cell("Choices"),
        header_cell("Same name in file"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for slot in &preview.slots {
        let exact = slot.candidates.iter().any(|c| c == &slot.canonical);
        table.add_row(vec![
            Cell::new(&slot.canonical),
            Cell::new(slot.candidates.len()),
            if exact {
                Cell::new("yes").fg(Color::Green)
            } else {
                dim_cell("-")
            },
        ]);
    }
    table
}

/// Canonical column, chosen source, and whether a later selection overrides it.
pub fn mapping_table(summary: &MappingSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Expected column"),
        header_cell("Source column"),
        header_cell("Note"),
    ]);
    apply_table_style(&mut table);
    for line in &summary.lines {
        let source = match &line.source {
            Some(source) => Cell::new(source),
            None => Cell::new("None").fg(Color::Red),
        };
        let note = match &line.shadowed_by {
            Some(winner) => Cell::new(format!("overridden by {winner}")).fg(Color::Yellow),
            None => dim_cell("-"),
        };
        table.add_row(vec![Cell::new(&line.canonical), source, note]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
