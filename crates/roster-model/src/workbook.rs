//! Row and workbook containers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::EntityKind;

/// One sheet row: column name to cell value, in column order.
pub type Row = Map<String, Value>;

/// The three datasets of a session.
///
/// A dataset is `None` when the import layer never produced it; the
/// relationship validator refuses to run relational checks in that case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(rename = "clientData", default, skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<Row>>,
    #[serde(rename = "workerData", default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<Vec<Row>>,
    #[serde(rename = "taskData", default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Row>>,
}

impl Workbook {
    /// Workbook with all three datasets present.
    pub fn new(clients: Vec<Row>, workers: Vec<Row>, tasks: Vec<Row>) -> Self {
        Self {
            clients: Some(clients),
            workers: Some(workers),
            tasks: Some(tasks),
        }
    }

    pub fn dataset(&self, kind: EntityKind) -> Option<&[Row]> {
        match kind {
            EntityKind::Clients => self.clients.as_deref(),
            EntityKind::Workers => self.workers.as_deref(),
            EntityKind::Tasks => self.tasks.as_deref(),
        }
    }

    /// Replace a single dataset.
    pub fn set_dataset(&mut self, kind: EntityKind, rows: Vec<Row>) {
        let slot = match kind {
            EntityKind::Clients => &mut self.clients,
            EntityKind::Workers => &mut self.workers,
            EntityKind::Tasks => &mut self.tasks,
        };
        *slot = Some(rows);
    }

    /// True when all three datasets are loaded.
    pub fn is_complete(&self) -> bool {
        self.clients.is_some() && self.workers.is_some() && self.tasks.is_some()
    }

    /// Row count per dataset (0 when absent).
    pub fn row_count(&self, kind: EntityKind) -> usize {
        self.dataset(kind).map_or(0, <[Row]>::len)
    }

    /// Replace all three datasets in one step.
    pub fn replace_all(&mut self, next: Workbook) {
        *self = next;
    }
}

/// Collect the header order observed across a dataset: first-seen order.
pub fn observed_columns(rows: &[Row]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|existing| existing == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}
