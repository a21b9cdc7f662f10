use roster_model::{DataType, EntityKind, Row, Workbook, describe_schema, observed_columns, schema};
use serde_json::json;

#[test]
fn registry_declares_id_and_name_columns() {
    for kind in EntityKind::ALL {
        let schema = schema(kind);
        assert_eq!(schema.kind, kind);
        let id = schema.column(schema.id_column).expect("id column declared");
        let name = schema.column(schema.name_column).expect("name column declared");
        assert!(id.required);
        assert!(name.required);
    }
}

#[test]
fn type_descriptions_follow_column_order() {
    let tasks = schema(EntityKind::Tasks);
    assert_eq!(
        tasks.column_names(),
        vec![
            "TaskID",
            "TaskName",
            "Category",
            "Duration",
            "RequiredSkills",
            "PreferredPhases",
            "MaxConcurrent"
        ]
    );
    assert_eq!(tasks.type_descriptions()[4], "array of strings");
    assert_eq!(tasks.data_type("PreferredPhases"), Some(DataType::NumberList));
    assert_eq!(tasks.data_type("Status"), None);
}

#[test]
fn entity_kind_parses_user_input() {
    assert_eq!(EntityKind::parse("Clients"), Some(EntityKind::Clients));
    assert_eq!(EntityKind::parse("workerData"), Some(EntityKind::Workers));
    assert_eq!(EntityKind::parse(" task "), Some(EntityKind::Tasks));
    assert_eq!(EntityKind::parse("phases"), None);
}

#[test]
fn describe_clients_schema() {
    insta::assert_snapshot!(describe_schema(EntityKind::Clients), @r"
    Client (clientData)
      ClientID*: string
      ClientName*: string
      PriorityLevel: number
      RequestedTaskIDs: array of strings
      GroupTag: string
      AttributesJSON: JSON object
    ");
}

#[test]
fn workbook_json_uses_dataset_keys() {
    let json = json!({
        "clientData": [{"ClientID": "C1"}],
        "taskData": []
    });
    let workbook: Workbook = serde_json::from_value(json).expect("deserialize workbook");
    assert_eq!(workbook.row_count(EntityKind::Clients), 1);
    assert!(workbook.workers.is_none());
    assert!(!workbook.is_complete());
}

#[test]
fn observed_columns_keep_first_seen_order() {
    let rows: Vec<Row> = vec![
        serde_json::from_value(json!({"B": 1, "A": 2})).expect("row"),
        serde_json::from_value(json!({"A": 3, "C": 4})).expect("row"),
    ];
    assert_eq!(observed_columns(&rows), vec!["B", "A", "C"]);
}
