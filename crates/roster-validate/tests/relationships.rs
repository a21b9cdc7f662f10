//! Cross-entity checks over complete workbooks.

mod common;

use common::{rows, sample_workbook};
use roster_model::{Row, ValidationThresholds};
use roster_validate::{
    RelationshipInput, validate_data_relationships, validate_workbook,
};
use serde_json::json;

fn input<'a>(clients: &'a [Row], workers: &'a [Row], tasks: &'a [Row]) -> RelationshipInput<'a> {
    RelationshipInput {
        client_data: Some(clients),
        worker_data: Some(workers),
        task_data: Some(tasks),
    }
}

fn worker(id: &str, skills: &[&str], group: &str) -> Row {
    common::row(json!({
        "WorkerID": id,
        "WorkerName": format!("Worker {id}"),
        "Skills": skills,
        "AvailableSlots": [1, 2, 3],
        "WorkerGroup": group,
        "QualificationLevel": 4
    }))
}

fn task(id: &str, skills: &[&str]) -> Row {
    common::row(json!({
        "TaskID": id,
        "TaskName": format!("Task {id}"),
        "Duration": 2,
        "RequiredSkills": skills,
        "PreferredPhases": [1, 2],
        "MaxConcurrent": 1
    }))
}

#[test]
fn sample_workbook_is_valid() {
    let report = validate_workbook(&sample_workbook(), &ValidationThresholds::default());
    assert!(report.valid, "{:?}", report.errors);
    assert_eq!(
        report.warnings,
        vec!["Row 2 (C002): High priority client (level 4) may require special attention"]
    );
}

#[test]
fn dangling_task_reference_names_both_ids() {
    let clients = rows(vec![json!({
        "ClientID": "C1",
        "ClientName": "Acme",
        "RequestedTaskIDs": ["T1", "T99"]
    })]);
    let workers = vec![worker("W1", &["a"], "G"), worker("W2", &["a"], "G")];
    let tasks = vec![task("T1", &["a"])];

    let report = validate_data_relationships(input(&clients, &workers, &tasks));
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["Client C1: Referenced TaskID T99 does not exist"]);
}

#[test]
fn skills_split_across_workers_is_an_error() {
    let clients = Vec::new();
    let workers = vec![worker("W1", &["X"], "G"), worker("W2", &["Y"], "G")];
    let tasks = vec![task("T1", &["X", "Y"])];

    let report = validate_data_relationships(input(&clients, &workers, &tasks));
    assert!(!report.valid);
    assert_eq!(
        report.errors,
        vec!["Task T1: No workers have all required skills: X, Y"]
    );
}

#[test]
fn single_qualified_worker_is_a_warning() {
    let clients = Vec::new();
    let workers = vec![worker("W1", &["X", "Y"], "G"), worker("W2", &["Y"], "G")];
    let tasks = vec![task("T1", &["X", "Y"])];

    let report = validate_data_relationships(input(&clients, &workers, &tasks));
    assert!(report.valid);
    assert_eq!(
        report.warnings,
        vec!["Task T1: Only 1 worker (W1) has all required skills: X, Y"]
    );
}

#[test]
fn task_without_required_skills_is_covered() {
    let clients = Vec::new();
    let workers = Vec::new();
    let tasks = vec![task("T1", &[])];

    let report = validate_data_relationships(input(&clients, &workers, &tasks));
    assert!(report.valid);
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn group_coverage() {
    let clients = rows(vec![
        json!({"ClientID": "C1", "ClientName": "A", "RequestedTaskIDs": ["T1"], "GroupTag": "Ghost"}),
        json!({"ClientID": "C2", "ClientName": "B", "RequestedTaskIDs": ["T1", "T2"], "GroupTag": "G"}),
        json!({"ClientID": "C3", "ClientName": "C", "RequestedTaskIDs": [], "GroupTag": "Ghost"}),
    ]);
    let workers = vec![worker("W1", &["a"], "G"), worker("W2", &["a"], "H")];
    let tasks = vec![task("T1", &[]), task("T2", &[])];

    let report = validate_data_relationships(input(&clients, &workers, &tasks));
    assert_eq!(report.errors, vec!["Client C1: No workers match GroupTag Ghost"]);
    assert_eq!(
        report.warnings,
        vec!["Client C2: Only 1 worker(s) match GroupTag G for 2 requested tasks"]
    );
}

#[test]
fn invalid_sheets_skip_relational_checks() {
    let clients = rows(vec![
        json!({
            "ClientID": "C1",
            "ClientName": "Acme",
            "PriorityLevel": 9,
            "RequestedTaskIDs": ["T99"]
        }),
        json!({"ClientID": "C2", "ClientName": "Globex", "PriorityLevel": 5}),
    ]);
    let workers = Vec::new();
    let tasks = vec![task("T1", &["missing"])];

    let report = validate_data_relationships(input(&clients, &workers, &tasks));
    assert!(!report.valid);
    assert_eq!(
        report.errors,
        vec!["Row 1 (C1): PriorityLevel must be between 1 and 5 (got 9)"]
    );
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn missing_sheet_drops_field_warnings() {
    let clients = rows(vec![json!({"ClientID": "C1", "ClientName": "Acme", "PriorityLevel": 5})]);
    let report = validate_data_relationships(RelationshipInput {
        client_data: Some(clients.as_slice()),
        worker_data: None,
        task_data: None,
    });
    assert!(!report.valid);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn missing_sheet_reports_and_skips() {
    let tasks = vec![task("T1", &["a"])];
    let report = validate_data_relationships(RelationshipInput {
        client_data: None,
        worker_data: None,
        task_data: Some(tasks.as_slice()),
    });
    assert_eq!(
        report.errors,
        vec![
            "Client data is missing or invalid",
            "Worker data is missing or invalid"
        ]
    );
}

#[test]
fn field_findings_precede_relational_findings() {
    let clients = rows(vec![json!({
        "ClientID": "C1",
        "ClientName": "Acme",
        "PriorityLevel": 5,
        "RequestedTaskIDs": ["T1"],
        "GroupTag": "G"
    })]);
    let workers = vec![worker("W1", &[], "G")];
    let tasks = vec![task("T1", &["a"])];

    let report = validate_data_relationships(input(&clients, &workers, &tasks));
    assert_eq!(report.errors, vec!["Task T1: No workers have all required skills: a"]);
    assert_eq!(
        report.warnings,
        vec![
            "Row 1 (C1): High priority client (level 5) may require special attention",
            "Row 1 (W1): Worker has no skills defined",
        ]
    );
}

#[test]
fn validation_is_idempotent() {
    let mut workbook = sample_workbook();
    if let Some(tasks) = workbook.tasks.as_mut() {
        tasks.push(task("T006", &["Rust"]));
    }
    let thresholds = ValidationThresholds::default();
    let first = validate_workbook(&workbook, &thresholds);
    let second = validate_workbook(&workbook, &thresholds);
    assert_eq!(first, second);
    assert!(!first.valid);
}
