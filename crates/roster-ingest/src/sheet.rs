//! CSV sheet reading with schema-driven cell coercion.

use std::path::Path;

use csv::ReaderBuilder;
use serde_json::{Number, Value};
use tracing::{debug, info, warn};

use roster_model::{DataType, EntityKind, Row, Workbook, normalize_list_value, schema};

use crate::discovery::discover_sheets;
use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Coerce one trimmed cell according to its declared type.
///
/// Returns `None` for an empty scalar cell. Text that does not fit the
/// declared type is kept verbatim so validation can report it.
pub fn coerce_cell(raw: &str, data_type: Option<DataType>) -> Option<Value> {
    match data_type {
        Some(DataType::StringList | DataType::NumberList) if raw.is_empty() => {
            Some(Value::Array(Vec::new()))
        }
        _ if raw.is_empty() => None,
        Some(list_type @ (DataType::StringList | DataType::NumberList)) => Some(
            normalize_list_value(&Value::String(raw.to_string()), list_type),
        ),
        Some(DataType::Number) => Some(parse_number(raw)),
        Some(DataType::JsonObject) => Some(match serde_json::from_str::<Value>(raw) {
            Ok(object @ Value::Object(_)) => object,
            _ => Value::String(raw.to_string()),
        }),
        Some(DataType::String) | None => Some(Value::String(raw.to_string())),
    }
}

fn parse_number(raw: &str) -> Value {
    if let Ok(integer) = raw.parse::<i64>() {
        return Value::from(integer);
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(raw.to_string()), Value::Number)
}

/// Read one sheet. The first non-blank record is the header row.
pub fn read_sheet(path: &Path, kind: EntityKind) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;

    let schema = schema(kind);
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        let Some(columns) = &headers else {
            let parsed: Vec<String> = record.iter().map(normalize_header).collect();
            if let Some(position) = parsed.iter().position(String::is_empty) {
                return Err(IngestError::InvalidHeader {
                    path: path.to_path_buf(),
                    reason: format!("column {} has no name", position + 1),
                });
            }
            let unknown: Vec<&str> = parsed
                .iter()
                .map(String::as_str)
                .filter(|column| schema.column(column).is_none())
                .collect();
            if !unknown.is_empty() {
                debug!(entity = %kind, columns = ?unknown, "sheet carries undeclared columns");
            }
            headers = Some(parsed);
            continue;
        };

        let mut row = Row::new();
        for (index, column) in columns.iter().enumerate() {
            let raw = cells.get(index).map_or("", String::as_str);
            if let Some(value) = coerce_cell(raw, schema.data_type(column)) {
                row.insert(column.clone(), value);
            }
        }
        rows.push(row);
    }

    if headers.is_none() {
        warn!(path = %path.display(), "sheet is empty");
    }
    info!(entity = %kind, path = %path.display(), rows = rows.len(), "sheet loaded");
    Ok(rows)
}

/// Load every sheet found in a folder. Kinds with no file stay absent.
pub fn load_workbook_dir(dir: &Path) -> Result<Workbook> {
    let sheets = discover_sheets(dir)?;
    for kind in sheets.missing() {
        warn!(entity = %kind, dir = %dir.display(), "no sheet found");
    }
    let mut workbook = Workbook::default();
    for kind in EntityKind::ALL {
        if let Some(path) = sheets.get(kind) {
            workbook.set_dataset(kind, read_sheet(path, kind)?);
        }
    }
    Ok(workbook)
}
