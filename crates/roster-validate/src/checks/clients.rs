//! Client sheet checks.

use std::collections::HashSet;

use serde_json::Value;

use roster_model::{DataType, EntityKind, Row, ValidationReport, ValidationThresholds, schema};

use crate::fields::{RowRef, check_identity, check_level, check_list};

/// Validate every client row.
pub fn check(rows: &[Row], thresholds: &ValidationThresholds) -> ValidationReport {
    let schema = schema(EntityKind::Clients);
    let mut report = ValidationReport::new();
    let mut seen_ids = HashSet::new();

    for (index, row) in rows.iter().enumerate() {
        let at = RowRef::new(index, row, schema);
        check_identity(row, &at, schema, &mut seen_ids, &mut report);

        if let Some(priority) = check_level(row, &at, "PriorityLevel", 1, 5, &mut report)
            && priority >= thresholds.high_priority_from
        {
            report.warning(format!(
                "{}: High priority client (level {priority}) may require special attention",
                at.prefix()
            ));
        }

        if let Some(requested) =
            check_list(row, &at, "RequestedTaskIDs", DataType::StringList, &mut report)
            && requested.len() > thresholds.max_requested_tasks
        {
            report.warning(format!(
                "{}: Client has a large number of requested tasks ({})",
                at.prefix(),
                requested.len()
            ));
        }

        check_attributes(row, &at, &mut report);
    }

    report
}

/// AttributesJSON is opaque beyond "must be an object"; JSON text holding an object passes.
fn check_attributes(row: &Row, at: &RowRef, report: &mut ValidationReport) {
    let Some(value) = row.get("AttributesJSON") else {
        return;
    };
    let is_object = match value {
        Value::Object(_) => true,
        Value::String(text) => matches!(
            serde_json::from_str::<Value>(text),
            Ok(Value::Object(_))
        ),
        Value::Null => true,
        _ => false,
    };
    if !is_object {
        report.error(format!(
            "{}: AttributesJSON must be a valid JSON object",
            at.prefix()
        ));
    }
}
