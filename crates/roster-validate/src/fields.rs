//! Cell readers shared by the entity checks and the relationship validator.

use std::collections::HashSet;

use serde_json::Value;

use roster_model::{
    DataType, EntitySchema, Row, ValidationReport, cell_text, coerce_number, format_number,
    is_blank, normalize_list_value,
};

/// Addressing for messages about one row.
pub(crate) struct RowRef {
    /// 1-based row number.
    pub number: usize,
    pub id: Option<String>,
}

impl RowRef {
    pub(crate) fn new(index: usize, row: &Row, schema: &EntitySchema) -> Self {
        let id = row
            .get(schema.id_column)
            .filter(|value| !is_blank(Some(value)))
            .map(cell_text);
        Self {
            number: index + 1,
            id,
        }
    }

    /// `Row 3` or `Row 3 (C1)`.
    pub(crate) fn prefix(&self) -> String {
        match &self.id {
            Some(id) => format!("Row {} ({id})", self.number),
            None => format!("Row {}", self.number),
        }
    }
}

pub(crate) enum NumberCell {
    Missing,
    NotNumeric(String),
    Value(f64),
}

/// Read a numeric cell. Null and absent cells are missing, not errors.
pub(crate) fn number_cell(row: &Row, column: &str) -> NumberCell {
    match row.get(column) {
        None | Some(Value::Null) => NumberCell::Missing,
        Some(value) => match coerce_number(value) {
            Some(number) => NumberCell::Value(number),
            None => NumberCell::NotNumeric(cell_text(value)),
        },
    }
}

pub(crate) enum ListCell {
    Missing,
    NotList,
    Items(Vec<Value>),
}

/// Read a list cell, normalizing text delivered by the import layer.
pub(crate) fn list_cell(row: &Row, column: &str, data_type: DataType) -> ListCell {
    match row.get(column) {
        None | Some(Value::Null) => ListCell::Missing,
        Some(value) => match normalize_list_value(value, data_type) {
            Value::Array(items) => ListCell::Items(items),
            _ => ListCell::NotList,
        },
    }
}

/// List items as trimmed text; empty items dropped. Missing or malformed lists are empty.
pub(crate) fn text_items(row: &Row, column: &str) -> Vec<String> {
    match list_cell(row, column, DataType::StringList) {
        ListCell::Items(items) => items
            .iter()
            .map(cell_text)
            .filter(|item| !item.is_empty())
            .collect(),
        ListCell::Missing | ListCell::NotList => Vec::new(),
    }
}

/// Scalar text of a cell, `None` when blank.
pub(crate) fn text_cell(row: &Row, column: &str) -> Option<String> {
    row.get(column)
        .filter(|value| !is_blank(Some(value)))
        .map(cell_text)
}

pub(crate) fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// A phase number is a positive whole number.
pub(crate) fn is_phase_number(value: &Value) -> bool {
    value
        .as_f64()
        .is_some_and(|number| is_whole(number) && number >= 1.0)
}

/// Required-field and ID-uniqueness checks shared by all entities.
pub(crate) fn check_identity(
    row: &Row,
    at: &RowRef,
    schema: &EntitySchema,
    seen_ids: &mut HashSet<String>,
    report: &mut ValidationReport,
) {
    match &at.id {
        None => report.error(format!("Row {}: {} is required", at.number, schema.id_column)),
        Some(id) => {
            if !seen_ids.insert(id.clone()) {
                report.error(format!(
                    "Row {}: Duplicate {} {id}",
                    at.number, schema.id_column
                ));
            }
        }
    }
    if is_blank(row.get(schema.name_column)) {
        report.error(format!("{}: {} is required", at.prefix(), schema.name_column));
    }
}

/// Integer level within an inclusive range. Returns the level when valid.
pub(crate) fn check_level(
    row: &Row,
    at: &RowRef,
    column: &str,
    min: i64,
    max: i64,
    report: &mut ValidationReport,
) -> Option<i64> {
    match number_cell(row, column) {
        NumberCell::Missing => None,
        NumberCell::NotNumeric(raw) => {
            report.error(format!(
                "{}: {column} must be between {min} and {max} (got '{raw}')",
                at.prefix()
            ));
            None
        }
        NumberCell::Value(level)
            if !is_whole(level) || level < min as f64 || level > max as f64 =>
        {
            report.error(format!(
                "{}: {column} must be between {min} and {max} (got {})",
                at.prefix(),
                format_number(level)
            ));
            None
        }
        NumberCell::Value(level) => Some(level as i64),
    }
}

/// Whole number at or above `min`. Returns the value when valid.
pub(crate) fn check_count(
    row: &Row,
    at: &RowRef,
    column: &str,
    min: f64,
    requirement: &str,
    report: &mut ValidationReport,
) -> Option<f64> {
    match number_cell(row, column) {
        NumberCell::Missing => None,
        NumberCell::NotNumeric(raw) => {
            report.error(format!(
                "{}: {column} must be {requirement} (got '{raw}')",
                at.prefix()
            ));
            None
        }
        NumberCell::Value(value) if !is_whole(value) || value < min => {
            report.error(format!(
                "{}: {column} must be {requirement} (got {})",
                at.prefix(),
                format_number(value)
            ));
            None
        }
        NumberCell::Value(value) => Some(value),
    }
}

/// List-typed field check. Returns the items when the cell holds a list.
pub(crate) fn check_list(
    row: &Row,
    at: &RowRef,
    column: &str,
    data_type: DataType,
    report: &mut ValidationReport,
) -> Option<Vec<Value>> {
    match list_cell(row, column, data_type) {
        ListCell::Missing => None,
        ListCell::NotList => {
            report.error(format!("{}: {column} must be an array", at.prefix()));
            None
        }
        ListCell::Items(items) => Some(items),
    }
}

/// Warn when a phase list holds anything but positive whole numbers.
pub(crate) fn check_phase_entries(
    items: &[Value],
    at: &RowRef,
    column: &str,
    report: &mut ValidationReport,
) {
    if items.iter().any(|item| !is_phase_number(item)) {
        report.warning(format!(
            "{}: {column} contains invalid phase numbers",
            at.prefix()
        ));
    }
}
