use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_model::{IssueSeverity, Row, ValidationReport, cell_text};

use crate::types::{AnalysisResult, FilterResult, RuleResult, SheetCount, ValidateResult};

pub fn print_validation(result: &ValidateResult) {
    println!("Source: {}", result.source.display());
    println!("{}", sheets_table(&result.sheets));
    print_report(&result.report);
}

pub fn print_analysis(result: &AnalysisResult) {
    match result.kind {
        Some(kind) => println!("Analysis ({kind}): {}", result.folder.display()),
        None => println!("Allocation suggestions: {}", result.folder.display()),
    }
    println!("{}", sheets_table(&result.sheets));
    println!();
    println!("{}", result.text);
}

pub fn print_filter(result: &FilterResult) {
    println!("Filter: {}", result.code);
    println!(
        "{} of {} {} rows matched",
        result.rows.len(),
        result.total,
        result.kind
    );
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
        return;
    }
    if result.rows.is_empty() {
        return;
    }
    println!("{}", rows_table(&result.rows));
}

pub fn print_rule(result: &RuleResult) {
    println!("Rule: {}", result.name);
    println!("Output: {}", result.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Before"),
        header_cell("After"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (before, after) in result.before.iter().zip(&result.after) {
        table.add_row(vec![
            Cell::new(before.kind.label()).add_attribute(Attribute::Bold),
            rows_cell(before.rows),
            change_cell(before, after),
        ]);
    }
    println!("{table}");
    print_report(&result.report);
}

/// Totals line followed by one row per issue, errors first.
pub fn print_report(report: &ValidationReport) {
    let status = if report.valid {
        Cell::new("VALID").fg(Color::Green)
    } else {
        Cell::new("INVALID").fg(Color::Red)
    }
    .add_attribute(Attribute::Bold);
    let mut totals = Table::new();
    totals.set_header(vec![
        header_cell("Status"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut totals);
    align_column(&mut totals, 1, CellAlignment::Right);
    align_column(&mut totals, 2, CellAlignment::Right);
    totals.add_row(vec![
        status,
        count_cell(report.error_count(), Color::Red),
        count_cell(report.warning_count(), Color::Yellow),
    ]);
    println!("{totals}");

    if report.errors.is_empty() && report.warnings.is_empty() {
        return;
    }
    let mut issues = Table::new();
    issues.set_header(vec![header_cell("Severity"), header_cell("Message")]);
    apply_issue_table_style(&mut issues);
    align_column(&mut issues, 0, CellAlignment::Center);
    for (severity, message) in report.issues() {
        issues.add_row(vec![severity_cell(severity), Cell::new(message)]);
    }
    println!("{issues}");
}

pub fn print_report_json(report: &ValidationReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn sheets_table(sheets: &[SheetCount]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Sheet"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for sheet in sheets {
        table.add_row(vec![
            Cell::new(sheet.kind.label()).add_attribute(Attribute::Bold),
            rows_cell(sheet.rows),
        ]);
    }
    table
}

fn rows_table(rows: &[Row]) -> Table {
    let columns = roster_model::observed_columns(rows);
    let mut table = Table::new();
    table.set_header(columns.iter().map(|column| header_cell(column)));
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(columns.iter().map(|column| match row.get(column) {
            Some(value) => Cell::new(cell_text(value)),
            None => dim_cell("-"),
        }));
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

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn rows_cell(rows: Option<usize>) -> Cell {
    match rows {
        Some(count) => Cell::new(count),
        None => dim_cell("missing"),
    }
}

fn change_cell(before: &SheetCount, after: &SheetCount) -> Cell {
    match (before.rows, after.rows) {
        (Some(old), Some(new)) if new < old => Cell::new(new).fg(Color::Yellow),
        (Some(old), Some(new)) if new > old => Cell::new(new).fg(Color::Green),
        (_, rows) => rows_cell(rows),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
