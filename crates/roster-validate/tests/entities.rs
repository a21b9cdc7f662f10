//! Field-level validation of individual sheets.

mod common;

use common::rows;
use roster_model::ValidationThresholds;
use roster_validate::{
    validate_client_data, validate_client_data_with, validate_task_data, validate_worker_data,
};
use serde_json::json;

#[test]
fn missing_dataset_yields_single_top_level_error() {
    let report = validate_client_data(None);
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["Client data is missing or invalid"]);
    assert!(report.warnings.is_empty());

    let report = validate_worker_data(None);
    assert_eq!(report.errors, vec!["Worker data is missing or invalid"]);
    let report = validate_task_data(None);
    assert_eq!(report.errors, vec!["Task data is missing or invalid"]);
}

#[test]
fn empty_dataset_is_valid() {
    let report = validate_client_data(Some(&[][..]));
    assert!(report.valid);
    assert!(report.errors.is_empty());
}

#[test]
fn duplicate_client_id_reported_once_on_second_row() {
    let clients = rows(vec![
        json!({"ClientID": "C1", "ClientName": "First"}),
        json!({"ClientID": "C1", "ClientName": "Second"}),
    ]);
    let report = validate_client_data(Some(clients.as_slice()));
    assert!(!report.valid);
    let duplicates: Vec<&String> = report
        .errors
        .iter()
        .filter(|message| message.contains("Duplicate ClientID"))
        .collect();
    assert_eq!(duplicates, vec!["Row 2: Duplicate ClientID C1"]);
}

#[test]
fn required_fields_are_reported_per_row() {
    let clients = rows(vec![
        json!({"ClientName": "No id"}),
        json!({"ClientID": "C2", "ClientName": ""}),
    ]);
    let report = validate_client_data(Some(clients.as_slice()));
    assert_eq!(
        report.errors,
        vec![
            "Row 1: ClientID is required",
            "Row 2 (C2): ClientName is required"
        ]
    );
}

#[test]
fn priority_boundaries() {
    let at_five = rows(vec![json!({"ClientID": "C1", "ClientName": "A", "PriorityLevel": 5})]);
    let report = validate_client_data(Some(at_five.as_slice()));
    assert!(report.valid);
    assert_eq!(
        report.warnings,
        vec!["Row 1 (C1): High priority client (level 5) may require special attention"]
    );

    for bad in [json!(6), json!(0), json!("urgent"), json!(2.5)] {
        let clients = rows(vec![
            json!({"ClientID": "C1", "ClientName": "A", "PriorityLevel": bad}),
        ]);
        let report = validate_client_data(Some(clients.as_slice()));
        assert!(!report.valid, "priority {bad} must be rejected");
        assert!(report.errors[0].contains("PriorityLevel must be between 1 and 5"));
    }

    let low = rows(vec![json!({"ClientID": "C1", "ClientName": "A", "PriorityLevel": 1})]);
    let report = validate_client_data(Some(low.as_slice()));
    assert!(report.valid);
    assert!(report.warnings.is_empty());
}

#[test]
fn numeric_text_is_coerced() {
    let clients = rows(vec![json!({"ClientID": "C1", "ClientName": "A", "PriorityLevel": "2"})]);
    assert!(validate_client_data(Some(clients.as_slice())).valid);
}

#[test]
fn all_row_problems_surface_in_one_pass() {
    let clients = rows(vec![json!({
        "PriorityLevel": 9,
        "RequestedTaskIDs": 42,
        "AttributesJSON": "not json"
    })]);
    let report = validate_client_data(Some(clients.as_slice()));
    assert_eq!(report.errors.len(), 5);
    assert!(report.errors[0].contains("ClientID is required"));
    assert!(report.errors[1].contains("ClientName is required"));
    assert!(report.errors[2].contains("PriorityLevel"));
    assert!(report.errors[3].contains("RequestedTaskIDs must be an array"));
    assert!(report.errors[4].contains("AttributesJSON must be a valid JSON object"));
}

#[test]
fn blank_attributes_text_is_not_an_object() {
    let clients = rows(vec![
        json!({"ClientID": "C1", "ClientName": "A", "AttributesJSON": ""}),
        json!({"ClientID": "C2", "ClientName": "B", "AttributesJSON": "   "}),
    ]);
    let report = validate_client_data(Some(clients.as_slice()));
    assert_eq!(
        report.errors,
        vec![
            "Row 1 (C1): AttributesJSON must be a valid JSON object",
            "Row 2 (C2): AttributesJSON must be a valid JSON object",
        ]
    );
}

#[test]
fn requested_task_text_is_normalized() {
    let clients = rows(vec![json!({
        "ClientID": "C1",
        "ClientName": "A",
        "RequestedTaskIDs": "T1, T2, T3, T4, T5, T6",
        "AttributesJSON": "{\"tier\": \"gold\"}"
    })]);
    let report = validate_client_data(Some(clients.as_slice()));
    assert!(report.valid, "{:?}", report.errors);
    assert_eq!(
        report.warnings,
        vec!["Row 1 (C1): Client has a large number of requested tasks (6)"]
    );
}

#[test]
fn thresholds_are_configurable() {
    let clients = rows(vec![json!({"ClientID": "C1", "ClientName": "A", "PriorityLevel": 4})]);
    let thresholds = ValidationThresholds {
        high_priority_from: 5,
        ..ValidationThresholds::default()
    };
    assert!(validate_client_data_with(Some(clients.as_slice()), &thresholds).warnings.is_empty());
    assert_eq!(validate_client_data(Some(clients.as_slice())).warnings.len(), 1);
}

#[test]
fn worker_numeric_fields() {
    let workers = rows(vec![
        json!({"WorkerID": "W1", "WorkerName": "A", "MaxLoadPerPhase": -1}),
        json!({"WorkerID": "W2", "WorkerName": "B", "MaxLoadPerPhase": "lots"}),
        json!({"WorkerID": "W3", "WorkerName": "C", "MaxLoadPerPhase": 7}),
        json!({"WorkerID": "W4", "WorkerName": "D", "MaxLoadPerPhase": 0, "QualificationLevel": 2}),
        json!({"WorkerID": "W5", "WorkerName": "E", "QualificationLevel": 6}),
    ]);
    let report = validate_worker_data(Some(workers.as_slice()));
    assert_eq!(
        report.errors,
        vec![
            "Row 1 (W1): MaxLoadPerPhase must be a non-negative integer (got -1)",
            "Row 2 (W2): MaxLoadPerPhase must be a non-negative integer (got 'lots')",
            "Row 5 (W5): QualificationLevel must be between 1 and 5 (got 6)",
        ]
    );
    assert_eq!(
        report.warnings,
        vec![
            "Row 3 (W3): Worker has high MaxLoadPerPhase (7)",
            "Row 4 (W4): Worker has low qualification level (2)",
        ]
    );
}

#[test]
fn worker_lists() {
    let workers = rows(vec![
        json!({"WorkerID": "W1", "WorkerName": "A", "Skills": [], "AvailableSlots": [1, 2, 3]}),
        json!({"WorkerID": "W2", "WorkerName": "B", "Skills": "x", "AvailableSlots": "1-2"}),
        json!({"WorkerID": "W3", "WorkerName": "C", "Skills": {"x": 1}, "AvailableSlots": [0, 1, 2]}),
    ]);
    let report = validate_worker_data(Some(workers.as_slice()));
    assert_eq!(report.errors, vec!["Row 3 (W3): Skills must be an array"]);
    assert_eq!(
        report.warnings,
        vec![
            "Row 1 (W1): Worker has no skills defined",
            "Row 2 (W2): Worker has limited availability (2 slots)",
            "Row 3 (W3): AvailableSlots contains invalid phase numbers",
        ]
    );
}

#[test]
fn task_fields() {
    let tasks = rows(vec![
        json!({"TaskID": "T1", "TaskName": "A", "Duration": 0, "MaxConcurrent": 0}),
        json!({"TaskID": "T2", "TaskName": "B", "Duration": 12, "MaxConcurrent": 5}),
        json!({
            "TaskID": "T3",
            "TaskName": "C",
            "RequiredSkills": ["a", "b", "c", "d"],
            "PreferredPhases": []
        }),
        json!({"TaskID": "T4", "TaskName": "D", "PreferredPhases": "2-4", "Duration": "3"}),
    ]);
    let report = validate_task_data(Some(tasks.as_slice()));
    assert_eq!(
        report.errors,
        vec![
            "Row 1 (T1): Duration must be a positive integer (got 0)",
            "Row 1 (T1): MaxConcurrent must be a positive integer (got 0)",
        ]
    );
    assert_eq!(
        report.warnings,
        vec![
            "Row 2 (T2): Task has long duration (12 phases)",
            "Row 2 (T2): Task has high concurrency (5)",
            "Row 3 (T3): Task requires many skills (4)",
            "Row 3 (T3): Task has no preferred phases defined",
        ]
    );
}

#[test]
fn large_values_warn_but_never_reject() {
    let tasks = rows(vec![json!({"TaskID": "T1", "TaskName": "A", "Duration": 1000})]);
    let report = validate_task_data(Some(tasks.as_slice()));
    assert!(report.valid);
    assert_eq!(report.warnings.len(), 1);
}
