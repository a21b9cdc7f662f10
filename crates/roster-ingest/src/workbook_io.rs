//! Workbook JSON documents and CSV export.

use std::fs;
use std::path::Path;

use csv::WriterBuilder;
use serde_json::Value;
use tracing::{info, warn};

use roster_model::{EntityKind, Row, Workbook, cell_text, observed_columns, schema};

use crate::error::{IngestError, Result};

/// Read `{ "clientData": [...], "workerData": [...], "taskData": [...] }`.
///
/// A missing key loads as an absent dataset. So does a dataset that is not
/// an array of objects, leaving the validator to report it as missing or
/// invalid. Only unparseable JSON or a non-object document is an error.
pub fn load_workbook_json(path: &Path) -> Result<Workbook> {
    let content = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value =
        serde_json::from_str(&content).map_err(|source| IngestError::WorkbookJson {
            path: path.to_path_buf(),
            source,
        })?;
    let Value::Object(mut document) = document else {
        return Err(IngestError::InvalidWorkbook {
            path: path.to_path_buf(),
            reason: "expected a JSON object with clientData, workerData and taskData".to_string(),
        });
    };

    let mut workbook = Workbook::default();
    for kind in EntityKind::ALL {
        let key = kind.dataset_key();
        match document.remove(key).map(dataset_rows) {
            None | Some(Ok(None)) => {}
            Some(Ok(Some(rows))) => workbook.set_dataset(kind, rows),
            Some(Err(found)) => warn!(
                path = %path.display(),
                dataset = key,
                found,
                "dataset is not an array of objects, loading it as absent"
            ),
        }
    }
    info!(
        path = %path.display(),
        clients = workbook.row_count(EntityKind::Clients),
        workers = workbook.row_count(EntityKind::Workers),
        tasks = workbook.row_count(EntityKind::Tasks),
        "workbook loaded"
    );
    Ok(workbook)
}

/// Rows of one dataset value; `null` is absent. `Err` names what was found instead.
fn dataset_rows(value: Value) -> std::result::Result<Option<Vec<Row>>, &'static str> {
    let items = match value {
        Value::Null => return Ok(None),
        Value::Array(items) => items,
        Value::Bool(_) => return Err("boolean"),
        Value::Number(_) => return Err("number"),
        Value::String(_) => return Err("string"),
        Value::Object(_) => return Err("object"),
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(row) => Ok(row),
            _ => Err("array with non-object rows"),
        })
        .collect::<std::result::Result<Vec<Row>, _>>()
        .map(Some)
}

pub fn write_workbook_json(path: &Path, workbook: &Workbook) -> Result<()> {
    let json =
        serde_json::to_string_pretty(workbook).map_err(|source| IngestError::WorkbookJson {
            path: path.to_path_buf(),
            source,
        })?;
    fs::write(path, json).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Column order for export: declared columns present in the data, then extras.
/// An empty dataset exports the full declared header.
fn export_columns(kind: EntityKind, rows: &[Row]) -> Vec<String> {
    let observed = observed_columns(rows);
    if observed.is_empty() {
        return schema(kind)
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
    }
    let mut columns: Vec<String> = schema(kind)
        .column_names()
        .into_iter()
        .filter(|name| observed.iter().any(|column| column == name))
        .map(str::to_string)
        .collect();
    for column in observed {
        if !columns.contains(&column) {
            columns.push(column);
        }
    }
    columns
}

/// CSV text of a cell. Lists join with `,`; objects serialize as JSON.
pub fn export_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Array(items)) => items.iter().map(cell_text).collect::<Vec<_>>().join(","),
        Some(object @ Value::Object(_)) => object.to_string(),
        Some(other) => cell_text(other),
    }
}

/// Export a dataset as CSV with a header row.
pub fn write_sheet_csv(path: &Path, kind: EntityKind, rows: &[Row]) -> Result<()> {
    let csv_error = |source| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new().from_path(path).map_err(csv_error)?;
    let columns = export_columns(kind, rows);
    writer.write_record(&columns).map_err(csv_error)?;
    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|column| export_cell(row.get(column)))
            .collect();
        writer.write_record(&record).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!(entity = %kind, path = %path.display(), rows = rows.len(), "sheet written");
    Ok(())
}
