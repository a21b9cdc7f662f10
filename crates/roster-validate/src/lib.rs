//! Validation of client, worker and task sheets.
//!
//! Validators never fail on bad data: every problem becomes a message in a
//! [`ValidationReport`], addressed by 1-based row number and, where known,
//! the row's ID.

pub mod checks;
mod fields;
mod relationships;

pub use relationships::{
    RelationshipInput, validate_data_relationships, validate_data_relationships_with,
};
pub use roster_model::{ValidationReport, ValidationThresholds};

use roster_model::{EntityKind, Row, Workbook};
use tracing::debug;

fn run_entity_check(
    kind: EntityKind,
    rows: Option<&[Row]>,
    check: impl FnOnce(&[Row]) -> ValidationReport,
) -> ValidationReport {
    let Some(rows) = rows else {
        return ValidationReport::rejected(format!(
            "{} data is missing or invalid",
            kind.label()
        ));
    };
    let report = check(rows);
    debug!(
        entity = %kind,
        rows = rows.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "entity validation complete"
    );
    report
}

pub fn validate_client_data(clients: Option<&[Row]>) -> ValidationReport {
    validate_client_data_with(clients, &ValidationThresholds::default())
}

pub fn validate_client_data_with(
    clients: Option<&[Row]>,
    thresholds: &ValidationThresholds,
) -> ValidationReport {
    run_entity_check(EntityKind::Clients, clients, |rows| {
        checks::clients::check(rows, thresholds)
    })
}

pub fn validate_worker_data(workers: Option<&[Row]>) -> ValidationReport {
    validate_worker_data_with(workers, &ValidationThresholds::default())
}

pub fn validate_worker_data_with(
    workers: Option<&[Row]>,
    thresholds: &ValidationThresholds,
) -> ValidationReport {
    run_entity_check(EntityKind::Workers, workers, |rows| {
        checks::workers::check(rows, thresholds)
    })
}

pub fn validate_task_data(tasks: Option<&[Row]>) -> ValidationReport {
    validate_task_data_with(tasks, &ValidationThresholds::default())
}

pub fn validate_task_data_with(
    tasks: Option<&[Row]>,
    thresholds: &ValidationThresholds,
) -> ValidationReport {
    run_entity_check(EntityKind::Tasks, tasks, |rows| {
        checks::tasks::check(rows, thresholds)
    })
}

/// Validate a single sheet by kind.
pub fn validate_entity(
    kind: EntityKind,
    rows: Option<&[Row]>,
    thresholds: &ValidationThresholds,
) -> ValidationReport {
    match kind {
        EntityKind::Clients => validate_client_data_with(rows, thresholds),
        EntityKind::Workers => validate_worker_data_with(rows, thresholds),
        EntityKind::Tasks => validate_task_data_with(rows, thresholds),
    }
}

/// Full validation of a workbook: all sheets plus relationships.
pub fn validate_workbook(workbook: &Workbook, thresholds: &ValidationThresholds) -> ValidationReport {
    validate_data_relationships_with(RelationshipInput::from(workbook), thresholds)
}
