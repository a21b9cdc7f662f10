//! Entity schema registry.
//!
//! The three sheet schemas are declared once here. Validators, the import
//! layer, prompt construction and the predicate compiler all read their
//! column lists and declared types from this module.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three entity sheets of a workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Clients,
    Workers,
    Tasks,
}

impl EntityKind {
    /// All entity kinds in report order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Clients, EntityKind::Workers, EntityKind::Tasks];

    /// Human-readable singular label ("Client", "Worker", "Task").
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Clients => "Client",
            EntityKind::Workers => "Worker",
            EntityKind::Tasks => "Task",
        }
    }

    /// Dataset key used in workbook JSON and generated code (`clientData`, ...).
    pub fn dataset_key(self) -> &'static str {
        match self {
            EntityKind::Clients => "clientData",
            EntityKind::Workers => "workerData",
            EntityKind::Tasks => "taskData",
        }
    }

    /// Parse a kind from user input (`clients`, `client`, `clientData`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "client" | "clients" | "clientdata" => Some(EntityKind::Clients),
            "worker" | "workers" | "workerdata" => Some(EntityKind::Workers),
            "task" | "tasks" | "taskdata" => Some(EntityKind::Tasks),
            _ => None,
        }
    }

    /// Schema for this kind.
    pub fn schema(self) -> &'static EntitySchema {
        schema(self)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Clients => "clients",
            EntityKind::Workers => "workers",
            EntityKind::Tasks => "tasks",
        };
        f.write_str(name)
    }
}

/// Declared semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    String,
    Number,
    StringList,
    NumberList,
    JsonObject,
}

impl DataType {
    /// Type description as it appears in generation prompts.
    pub fn describe(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::StringList => "array of strings",
            DataType::NumberList => "array of numbers",
            DataType::JsonObject => "JSON object",
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, DataType::StringList | DataType::NumberList)
    }
}

/// A declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub data_type: DataType,
    pub required: bool,
}

const fn column(name: &'static str, data_type: DataType, required: bool) -> ColumnSpec {
    ColumnSpec {
        name,
        data_type,
        required,
    }
}

/// Schema of one entity sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub id_column: &'static str,
    pub name_column: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl EntitySchema {
    /// Ordered column names.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    /// Declared type descriptions, parallel to [`Self::column_names`].
    pub fn type_descriptions(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .map(|column| column.data_type.describe())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&'static ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn data_type(&self, name: &str) -> Option<DataType> {
        self.column(name).map(|column| column.data_type)
    }
}

static CLIENT_COLUMNS: [ColumnSpec; 6] = [
    column("ClientID", DataType::String, true),
    column("ClientName", DataType::String, true),
    column("PriorityLevel", DataType::Number, false),
    column("RequestedTaskIDs", DataType::StringList, false),
    column("GroupTag", DataType::String, false),
    column("AttributesJSON", DataType::JsonObject, false),
];

static WORKER_COLUMNS: [ColumnSpec; 7] = [
    column("WorkerID", DataType::String, true),
    column("WorkerName", DataType::String, true),
    column("Skills", DataType::StringList, false),
    column("AvailableSlots", DataType::NumberList, false),
    column("MaxLoadPerPhase", DataType::Number, false),
    column("WorkerGroup", DataType::String, false),
    column("QualificationLevel", DataType::Number, false),
];

static TASK_COLUMNS: [ColumnSpec; 7] = [
    column("TaskID", DataType::String, true),
    column("TaskName", DataType::String, true),
    column("Category", DataType::String, false),
    column("Duration", DataType::Number, false),
    column("RequiredSkills", DataType::StringList, false),
    column("PreferredPhases", DataType::NumberList, false),
    column("MaxConcurrent", DataType::Number, false),
];

static CLIENT_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Clients,
    id_column: "ClientID",
    name_column: "ClientName",
    columns: &CLIENT_COLUMNS,
};

static WORKER_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Workers,
    id_column: "WorkerID",
    name_column: "WorkerName",
    columns: &WORKER_COLUMNS,
};

static TASK_SCHEMA: EntitySchema = EntitySchema {
    kind: EntityKind::Tasks,
    id_column: "TaskID",
    name_column: "TaskName",
    columns: &TASK_COLUMNS,
};

/// Look up the schema for an entity kind.
pub fn schema(kind: EntityKind) -> &'static EntitySchema {
    match kind {
        EntityKind::Clients => &CLIENT_SCHEMA,
        EntityKind::Workers => &WORKER_SCHEMA,
        EntityKind::Tasks => &TASK_SCHEMA,
    }
}

/// Render a schema as `Column: type` lines, required columns marked with `*`.
pub fn describe_schema(kind: EntityKind) -> String {
    let schema = schema(kind);
    let mut lines = Vec::with_capacity(schema.columns.len() + 1);
    lines.push(format!("{} ({})", kind.label(), kind.dataset_key()));
    for column in schema.columns {
        let marker = if column.required { "*" } else { "" };
        lines.push(format!(
            "  {}{}: {}",
            column.name,
            marker,
            column.data_type.describe()
        ));
    }
    lines.join("\n")
}
