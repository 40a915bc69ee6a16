//! Run summary tables printed after a command completes.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{ClassifyRunResult, MatchRunResult};

pub fn print_match_summary(result: &MatchRunResult) {
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source rows"),
        header_cell("Relation rows"),
        header_cell("Matched"),
        header_cell("Unmatched"),
        header_cell("Min score"),
        header_cell("Mean score"),
    ]);
    apply_table_style(&mut table);
    let unmatched = result.source_rows.saturating_sub(result.matched);
    table.add_row(vec![
        Cell::new(result.source_rows),
        Cell::new(result.relation_rows),
        count_cell(result.matched, Color::Green),
        count_cell(unmatched, Color::Yellow),
        Cell::new(result.min_score),
        match result.mean_score {
            Some(mean) => Cell::new(format!("{mean:.1}")),
            None => dim_cell("-"),
        },
    ]);
    println!("{table}");
}

pub fn print_classify_summary(result: &ClassifyRunResult) {
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Classified"),
        header_cell("Category only"),
        header_cell("Unclassified"),
        header_cell("Min score"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(result.rows),
        count_cell(result.classified, Color::Green),
        count_cell(result.category_only, Color::Yellow),
        count_cell(result.unclassified, Color::Red),
        Cell::new(result.min_score),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for index in 0..table.column_count() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
