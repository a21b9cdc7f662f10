#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use roster_model::{Row, Workbook};
use roster_rules::{GenerationError, TextGenerator};
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

pub fn workbook() -> Workbook {
    Workbook::new(
        rows(vec![
            json!({"ClientID": "C1", "ClientName": "Acme", "PriorityLevel": 5, "GroupTag": "IT", "RequestedTaskIDs": ["T1"]}),
            json!({"ClientID": "C2", "ClientName": "Beta", "PriorityLevel": 2, "GroupTag": "Ops", "RequestedTaskIDs": ["T2"]}),
            json!({"ClientID": "C3", "ClientName": "Core", "PriorityLevel": 3, "GroupTag": "IT", "RequestedTaskIDs": []}),
        ]),
        rows(vec![
            json!({"WorkerID": "W1", "WorkerName": "Ann", "Skills": ["Rust", "SQL"], "WorkerGroup": "IT"}),
            json!({"WorkerID": "W2", "WorkerName": "Bo", "Skills": ["Excel"], "WorkerGroup": "Ops"}),
        ]),
        rows(vec![
            json!({"TaskID": "T1", "TaskName": "Build", "Duration": 2, "RequiredSkills": ["Rust"]}),
            json!({"TaskID": "T2", "TaskName": "Report", "Duration": 1, "RequiredSkills": ["Excel"]}),
        ]),
    )
}

/// In-memory generator replaying a fixed reply and recording prompts.
pub struct ScriptedGenerator {
    reply: Result<String, String>,
    delay: Option<Duration>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log").clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("prompt log").len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().expect("prompt log").push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(GenerationError::Request(message.clone())),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
