#![allow(dead_code)]

use roster_model::{Row, Workbook};
use serde_json::{Value, json};

pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

pub fn rows(values: Vec<Value>) -> Vec<Row> {
    values.into_iter().map(row).collect()
}

pub fn sample_workbook() -> Workbook {
    let clients = rows(vec![
        json!({
            "ClientID": "C001",
            "ClientName": "Acme Corporation",
            "PriorityLevel": 3,
            "RequestedTaskIDs": ["T001", "T002"],
            "GroupTag": "Engineering",
            "AttributesJSON": {"industry": "Manufacturing", "size": "Large"}
        }),
        json!({
            "ClientID": "C002",
            "ClientName": "TechStart Inc",
            "PriorityLevel": 4,
            "RequestedTaskIDs": ["T003", "T004", "T005"],
            "GroupTag": "IT",
            "AttributesJSON": {"industry": "Technology", "size": "Medium"}
        }),
        json!({
            "ClientID": "C003",
            "ClientName": "Global Services",
            "PriorityLevel": 2,
            "RequestedTaskIDs": ["T001"],
            "GroupTag": "Consulting",
            "AttributesJSON": {"industry": "Services", "size": "Small"}
        }),
    ]);
    let workers = rows(vec![
        json!({
            "WorkerID": "W001",
            "WorkerName": "John Smith",
            "Skills": ["JavaScript", "React", "Node.js"],
            "AvailableSlots": [1, 2, 3, 4],
            "MaxLoadPerPhase": 2,
            "WorkerGroup": "Engineering",
            "QualificationLevel": 4
        }),
        json!({
            "WorkerID": "W002",
            "WorkerName": "Jane Doe",
            "Skills": ["Python", "Data Analysis", "Machine Learning", "Project Management"],
            "AvailableSlots": [2, 3, 5],
            "MaxLoadPerPhase": 3,
            "WorkerGroup": "IT",
            "QualificationLevel": 5
        }),
        json!({
            "WorkerID": "W003",
            "WorkerName": "Bob Johnson",
            "Skills": ["Project Management", "Consulting", "JavaScript", "React", "Node.js"],
            "AvailableSlots": [1, 4, 6],
            "MaxLoadPerPhase": 1,
            "WorkerGroup": "Consulting",
            "QualificationLevel": 3
        }),
        json!({
            "WorkerID": "W004",
            "WorkerName": "Ada Byte",
            "Skills": ["Python", "Data Analysis", "Machine Learning"],
            "AvailableSlots": "1-4",
            "MaxLoadPerPhase": 2,
            "WorkerGroup": "IT",
            "QualificationLevel": 4
        }),
        json!({
            "WorkerID": "W005",
            "WorkerName": "Linus Node",
            "Skills": "JavaScript, React",
            "AvailableSlots": [1, 2, 3],
            "MaxLoadPerPhase": 2,
            "WorkerGroup": "IT",
            "QualificationLevel": 4
        }),
        json!({
            "WorkerID": "W006",
            "WorkerName": "Grace Ops",
            "Skills": ["Node.js", "Project Management"],
            "AvailableSlots": [2, 3, 4],
            "MaxLoadPerPhase": 2,
            "WorkerGroup": "Engineering",
            "QualificationLevel": 3
        }),
    ]);
    let tasks = rows(vec![
        json!({
            "TaskID": "T001",
            "TaskName": "Website Development",
            "Category": "Development",
            "Duration": 5,
            "RequiredSkills": ["JavaScript", "React"],
            "PreferredPhases": [1, 2],
            "MaxConcurrent": 2
        }),
        json!({
            "TaskID": "T002",
            "TaskName": "Backend API",
            "Category": "Development",
            "Duration": 4,
            "RequiredSkills": ["Node.js"],
            "PreferredPhases": "2-3",
            "MaxConcurrent": 1
        }),
        json!({
            "TaskID": "T003",
            "TaskName": "Data Analysis",
            "Category": "Analytics",
            "Duration": 3,
            "RequiredSkills": ["Python", "Data Analysis"],
            "PreferredPhases": [1, 2, 3],
            "MaxConcurrent": 2
        }),
        json!({
            "TaskID": "T004",
            "TaskName": "ML Model Training",
            "Category": "Analytics",
            "Duration": 6,
            "RequiredSkills": ["Python", "Machine Learning"],
            "PreferredPhases": "[3,4]",
            "MaxConcurrent": 1
        }),
        json!({
            "TaskID": "T005",
            "TaskName": "Project Planning",
            "Category": "Management",
            "Duration": 2,
            "RequiredSkills": ["Project Management"],
            "PreferredPhases": [1],
            "MaxConcurrent": 3
        }),
    ]);
    Workbook::new(clients, workers, tasks)
}
