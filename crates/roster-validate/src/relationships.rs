//! Cross-entity validation.
//!
//! Some constraints only make sense with all three sheets loaded:
//!
//! - **Task references**: every `RequestedTaskIDs` entry must name an
//!   existing `TaskID`.
//! - **Skill coverage**: for every task, at least one worker must hold the
//!   full set of `RequiredSkills`. A single qualifying worker is a single
//!   point of failure and is flagged.
//! - **Group coverage**: a client with requested tasks and a `GroupTag` needs
//!   workers whose `WorkerGroup` matches it.
//!
//! Relational checks only run against structurally valid sheets; otherwise
//! the field-level findings are returned alone.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use roster_model::{EntityKind, Row, ValidationReport, ValidationThresholds, Workbook, schema};

use crate::fields::{text_cell, text_items};
use crate::{validate_client_data_with, validate_task_data_with, validate_worker_data_with};

/// Input for relationship validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipInput<'a> {
    pub client_data: Option<&'a [Row]>,
    pub worker_data: Option<&'a [Row]>,
    pub task_data: Option<&'a [Row]>,
}

impl<'a> From<&'a Workbook> for RelationshipInput<'a> {
    fn from(workbook: &'a Workbook) -> Self {
        Self {
            client_data: workbook.clients.as_deref(),
            worker_data: workbook.workers.as_deref(),
            task_data: workbook.tasks.as_deref(),
        }
    }
}

/// Findings of one relational check.
#[derive(Default)]
struct CheckResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl CheckResult {
    fn merge_into(self, report: &mut ValidationReport) {
        for error in self.errors {
            report.error(error);
        }
        for warning in self.warnings {
            report.warning(warning);
        }
    }
}

/// Validate the three sheets and their relationships with default thresholds.
pub fn validate_data_relationships(input: RelationshipInput<'_>) -> ValidationReport {
    validate_data_relationships_with(input, &ValidationThresholds::default())
}

/// Validate the three sheets and their relationships.
///
/// Messages are ordered clients, workers, tasks, then relational findings.
/// When a sheet is missing or structurally invalid the relational checks are
/// skipped and only the field-level errors are returned.
pub fn validate_data_relationships_with(
    input: RelationshipInput<'_>,
    thresholds: &ValidationThresholds,
) -> ValidationReport {
    let client_report = validate_client_data_with(input.client_data, thresholds);
    let worker_report = validate_worker_data_with(input.worker_data, thresholds);
    let task_report = validate_task_data_with(input.task_data, thresholds);
    let structurally_valid = client_report.valid && worker_report.valid && task_report.valid;

    let mut report = ValidationReport::new();
    report.absorb(client_report);
    report.absorb(worker_report);
    report.absorb(task_report);

    let (Some(clients), Some(workers), Some(tasks)) =
        (input.client_data, input.worker_data, input.task_data)
    else {
        report.warnings.clear();
        return report;
    };
    if !structurally_valid {
        debug!(
            errors = report.error_count(),
            "skipping relational checks on invalid sheets"
        );
        report.warnings.clear();
        return report;
    }

    let references = check_task_references(clients, tasks);
    let coverage = check_skill_coverage(workers, tasks);
    let groups = check_group_coverage(clients, workers);
    debug!(
        reference_errors = references.errors.len(),
        skill_errors = coverage.errors.len(),
        skill_warnings = coverage.warnings.len(),
        group_errors = groups.errors.len(),
        group_warnings = groups.warnings.len(),
        "relational checks complete"
    );
    references.merge_into(&mut report);
    coverage.merge_into(&mut report);
    groups.merge_into(&mut report);

    report
}

fn client_label(client: &Row) -> String {
    text_cell(client, schema(EntityKind::Clients).id_column).unwrap_or_default()
}

// ============================================================================
// Task references
// ============================================================================

fn check_task_references(clients: &[Row], tasks: &[Row]) -> CheckResult {
    let task_id_column = schema(EntityKind::Tasks).id_column;
    let task_ids: HashSet<String> = tasks
        .iter()
        .filter_map(|task| text_cell(task, task_id_column))
        .collect();

    let mut result = CheckResult::default();
    for client in clients {
        for task_id in text_items(client, "RequestedTaskIDs") {
            if !task_ids.contains(&task_id) {
                result.errors.push(format!(
                    "Client {}: Referenced TaskID {task_id} does not exist",
                    client_label(client)
                ));
            }
        }
    }
    result
}

// ============================================================================
// Skill coverage
// ============================================================================

fn check_skill_coverage(workers: &[Row], tasks: &[Row]) -> CheckResult {
    let worker_id_column = schema(EntityKind::Workers).id_column;
    let task_id_column = schema(EntityKind::Tasks).id_column;
    let worker_skills: Vec<(String, BTreeSet<String>)> = workers
        .iter()
        .map(|worker| {
            let id = text_cell(worker, worker_id_column).unwrap_or_default();
            let skills = text_items(worker, "Skills").into_iter().collect();
            (id, skills)
        })
        .collect();

    let mut result = CheckResult::default();
    for task in tasks {
        let required = text_items(task, "RequiredSkills");
        // No required skills: trivially covered
        if required.is_empty() {
            continue;
        }
        let task_id = text_cell(task, task_id_column).unwrap_or_default();
        let qualified: Vec<&str> = worker_skills
            .iter()
            .filter(|(_, skills)| required.iter().all(|skill| skills.contains(skill)))
            .map(|(id, _)| id.as_str())
            .collect();

        match qualified.as_slice() {
            [] => result.errors.push(format!(
                "Task {task_id}: No workers have all required skills: {}",
                required.join(", ")
            )),
            [only] => result.warnings.push(format!(
                "Task {task_id}: Only 1 worker ({only}) has all required skills: {}",
                required.join(", ")
            )),
            _ => {}
        }
    }
    result
}

// ============================================================================
// Group coverage
// ============================================================================

fn check_group_coverage(clients: &[Row], workers: &[Row]) -> CheckResult {
    let mut result = CheckResult::default();
    for client in clients {
        let Some(group_tag) = text_cell(client, "GroupTag") else {
            continue;
        };
        let requested = text_items(client, "RequestedTaskIDs").len();
        if requested == 0 {
            continue;
        }
        let matching = workers
            .iter()
            .filter(|worker| text_cell(worker, "WorkerGroup").as_deref() == Some(group_tag.as_str()))
            .count();

        if matching == 0 {
            result.errors.push(format!(
                "Client {}: No workers match GroupTag {group_tag}",
                client_label(client)
            ));
        } else if matching < requested {
            result.warnings.push(format!(
                "Client {}: Only {matching} worker(s) match GroupTag {group_tag} for {requested} requested tasks",
                client_label(client)
            ));
        }
    }
    result
}
