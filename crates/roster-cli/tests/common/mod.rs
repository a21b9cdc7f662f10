#![allow(dead_code)]

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use roster_rules::{GenerationError, TextGenerator};
use tempfile::TempDir;

pub const CLIENTS: &str = "ClientID,ClientName,PriorityLevel,RequestedTaskIDs,GroupTag\n\
C1,Acme,5,T1,IT\n\
C2,Beta,2,T2,Ops\n\
C3,Core,3,,IT\n";

pub const WORKERS: &str = "WorkerID,WorkerName,Skills,AvailableSlots,MaxLoadPerPhase,WorkerGroup,QualificationLevel\n\
W1,Ann,\"Rust,SQL\",\"1,2,3\",2,IT,4\n\
W2,Bo,Excel,1-4,1,Ops,3\n";

pub const TASKS: &str = "TaskID,TaskName,Category,Duration,RequiredSkills,PreferredPhases,MaxConcurrent\n\
T1,Build,Dev,2,Rust,1-2,1\n\
T2,Report,Ops,1,Excel,3,1\n";

/// A folder holding the three sample sheets.
pub fn sample_folder() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write_sheets(dir.path(), &[("clients.csv", CLIENTS), ("workers.csv", WORKERS), ("tasks.csv", TASKS)]);
    dir
}

pub fn write_sheets(dir: &Path, sheets: &[(&str, &str)]) {
    for (name, content) in sheets {
        fs::write(dir.join(name), content).expect("write sheet");
    }
}

/// Generator that always answers with the same text.
pub struct FixedReply(pub &'static str);

#[async_trait]
impl TextGenerator for FixedReply {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        Ok(self.0.to_string())
    }

    fn model(&self) -> &str {
        "fixed"
    }
}
