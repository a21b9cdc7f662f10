//! Invariants that hold for arbitrary sheets.

use proptest::prelude::*;
use roster_model::{Row, ValidationThresholds, Workbook};
use roster_validate::{validate_client_data, validate_workbook};
use serde_json::{Map, Value, json};

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(|n| json!(n % 20)),
        "[A-Z]{1,2}[0-9]{0,2}".prop_map(Value::String),
        prop::collection::vec("[A-Za-z]{1,4}", 0..4).prop_map(|items| json!(items)),
        Just(json!("1-3")),
        Just(json!({"k": 1})),
    ]
}

fn sheet(columns: &'static [&'static str]) -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        prop::collection::vec(cell(), columns.len()).prop_map(move |cells| {
            columns
                .iter()
                .zip(cells)
                .map(|(column, value)| ((*column).to_string(), value))
                .collect::<Map<String, Value>>()
        }),
        0..6,
    )
}

const CLIENT_COLUMNS: &[&str] = &[
    "ClientID",
    "ClientName",
    "PriorityLevel",
    "RequestedTaskIDs",
    "GroupTag",
    "AttributesJSON",
];
const WORKER_COLUMNS: &[&str] = &[
    "WorkerID",
    "WorkerName",
    "Skills",
    "AvailableSlots",
    "MaxLoadPerPhase",
    "WorkerGroup",
    "QualificationLevel",
];
const TASK_COLUMNS: &[&str] = &[
    "TaskID",
    "TaskName",
    "Category",
    "Duration",
    "RequiredSkills",
    "PreferredPhases",
    "MaxConcurrent",
];

proptest! {
    #[test]
    fn valid_flag_matches_error_list(
        clients in sheet(CLIENT_COLUMNS),
        workers in sheet(WORKER_COLUMNS),
        tasks in sheet(TASK_COLUMNS),
    ) {
        let workbook = Workbook::new(clients, workers, tasks);
        let report = validate_workbook(&workbook, &ValidationThresholds::default());
        prop_assert_eq!(report.valid, report.errors.is_empty());
    }

    #[test]
    fn validation_is_deterministic(clients in sheet(CLIENT_COLUMNS)) {
        let first = validate_client_data(Some(clients.as_slice()));
        let second = validate_client_data(Some(clients.as_slice()));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_message_names_a_row(clients in sheet(CLIENT_COLUMNS)) {
        let report = validate_client_data(Some(clients.as_slice()));
        for message in report.errors.iter().chain(&report.warnings) {
            prop_assert!(message.starts_with("Row "), "unaddressed message: {}", message);
        }
    }
}
