//! Generation prompts.
//!
//! Prompts are pure functions of their inputs so identical requests produce
//! identical prompts. Column lists are rendered as JSON arrays.
//!
//! Filter and rule prompts ask for code; analysis and allocation prompts ask
//! for prose that is shown to the user as-is.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use roster_model::{EntityKind, Row, Workbook, cell_text};

/// Rows of each dataset quoted in an analysis prompt.
pub const ANALYSIS_SAMPLE_ROWS: usize = 3;

fn json_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Prompt asking for a bare boolean Rhai expression over `row`.
pub fn filter_prompt(columns: &[String], data_types: &[String], description: &str) -> String {
    format!(
        r#"You are a code generator.
Given these column names: {columns}
The data structure of the respective columns: {data_types}
Generate a Rhai boolean expression over a row object named "row" that is true if the row matches the condition described below.

Condition (in plain English): "{description}"

Rules:
- Only return a single Rhai expression, not a function or statement.
- Access columns as properties of "row".
- Only reference the provided column names exactly as they appear.
- Use "==" and "!=" for comparisons and double-quoted strings.
- Arrays support "contains(value)" and "len()".
- Do not add comments, explanations or code fences.

Example output: row.Status == "Active" && row.Amount > 5000"#,
        columns = json_list(columns),
        data_types = json_list(data_types),
        description = description.trim(),
    )
}

/// Prompt asking for a Rhai `ruleFunction` over the three datasets.
///
/// Only headers, declared types and row counts of the workbook are sent.
pub fn rule_prompt(description: &str, workbook: &Workbook) -> String {
    let mut prompt = String::from(
        "You are a code generator.\n\
         You will receive the schema of three datasets: clientData, workerData, taskData.\n\
         Each is an array of row maps with the headers and data types below.\n",
    );

    for kind in EntityKind::ALL {
        let schema = kind.schema();
        let headers: Vec<String> = schema
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let types: Vec<String> = schema
            .type_descriptions()
            .into_iter()
            .map(str::to_string)
            .collect();
        let _ = write!(
            prompt,
            "\n{key}:\nHeaders: {headers}\nData types: {types}\nRows: {rows}\n",
            key = kind.dataset_key(),
            headers = json_list(&headers),
            types = json_list(&types),
            rows = workbook.row_count(kind),
        );
    }

    let _ = write!(
        prompt,
        r#"
The rule description is: "{description}".

Generate ONLY Rhai code defining a function named "ruleFunction" with this signature:

fn ruleFunction(clientData, workerData, taskData) {{
    // modify and return updated data
    return #{{ clientData: clientData, workerData: workerData, taskData: taskData }};
}}

Rules:
- Do not include explanations, comments or code fences.
- The code must be valid Rhai.
- Use only the given headers exactly as they appear.
- The function should implement the rule described above.
- Return an object map with exactly the keys clientData, workerData and taskData, each an array of row maps.
- Use closures of the form |row| ... with filter and map.

Example output:
fn ruleFunction(clientData, workerData, taskData) {{
    let updatedClientData = clientData.filter(|row| row.PriorityLevel >= 3);
    return #{{ clientData: updatedClientData, workerData: workerData, taskData: taskData }};
}}"#,
        description = description.trim(),
    );
    prompt
}

/// Focus of a workbook analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// Capacity, skills, priorities and optimization together.
    #[default]
    General,
    Capacity,
    Skills,
    Priority,
    Optimization,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 5] = [
        AnalysisKind::General,
        AnalysisKind::Capacity,
        AnalysisKind::Skills,
        AnalysisKind::Priority,
        AnalysisKind::Optimization,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::General => "general",
            AnalysisKind::Capacity => "capacity",
            AnalysisKind::Skills => "skills",
            AnalysisKind::Priority => "priority",
            AnalysisKind::Optimization => "optimization",
        }
    }

    /// Parse a kind name; unknown names fall back to [`AnalysisKind::General`].
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
            .unwrap_or_default()
    }

    fn focus(self) -> &'static str {
        match self {
            AnalysisKind::General => {
                "Provide a comprehensive analysis covering capacity, skills, priorities, and optimization opportunities."
            }
            AnalysisKind::Capacity => {
                "Focus on: Analyze worker capacity vs task demand. Identify bottlenecks and resource allocation issues."
            }
            AnalysisKind::Skills => {
                "Focus on: Analyze skill gaps and mismatches. Identify which skills are in high demand vs available capacity."
            }
            AnalysisKind::Priority => {
                "Focus on: Analyze client priority distribution and potential conflicts. Suggest priority-based allocation strategies."
            }
            AnalysisKind::Optimization => {
                "Focus on: Provide optimization recommendations for better task allocation and resource utilization."
            }
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar cell for a summary line; absent or blank cells read `n/a`.
fn summary_cell(row: &Row, column: &str) -> String {
    let text = row.get(column).map(cell_text).unwrap_or_default();
    if text.is_empty() { "n/a".to_string() } else { text }
}

/// List cell for a summary line, comma separated; empty lists read `None`.
fn summary_list(row: &Row, column: &str) -> String {
    let mut items: Vec<String> = match row.get(column) {
        Some(Value::Array(items)) => items.iter().map(cell_text).collect(),
        Some(other) => vec![cell_text(other)],
        None => Vec::new(),
    };
    items.retain(|item| !item.is_empty());
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn summary_line(kind: EntityKind, row: &Row) -> String {
    match kind {
        EntityKind::Clients => format!(
            "- {} (Priority: {}, Tasks: {})",
            summary_cell(row, "ClientName"),
            summary_cell(row, "PriorityLevel"),
            summary_list(row, "RequestedTaskIDs"),
        ),
        EntityKind::Workers => format!(
            "- {} (Skills: {}, Max Load: {})",
            summary_cell(row, "WorkerName"),
            summary_list(row, "Skills"),
            summary_cell(row, "MaxLoadPerPhase"),
        ),
        EntityKind::Tasks => format!(
            "- {} (Duration: {}, Skills: {})",
            summary_cell(row, "TaskName"),
            summary_cell(row, "Duration"),
            summary_list(row, "RequiredSkills"),
        ),
    }
}

/// Prompt asking for a written analysis of the workbook.
///
/// Each dataset is summarized by its row count and its first
/// [`ANALYSIS_SAMPLE_ROWS`] rows. Absent datasets count as empty.
pub fn analysis_prompt(workbook: &Workbook, kind: AnalysisKind) -> String {
    let mut prompt = String::from(
        "You are a data analyst expert specializing in workforce management and task allocation. \
         Provide clear, actionable insights.\n\n\
         Analyze the following workforce management data:\n",
    );
    for entity in EntityKind::ALL {
        let rows = workbook.dataset(entity).unwrap_or_default();
        let noun = entity.to_string();
        let _ = write!(
            prompt,
            "\n{} ({} total):\n",
            noun.to_uppercase(),
            rows.len()
        );
        for row in rows.iter().take(ANALYSIS_SAMPLE_ROWS) {
            let _ = writeln!(prompt, "{}", summary_line(entity, row));
        }
        if rows.len() > ANALYSIS_SAMPLE_ROWS {
            let _ = writeln!(
                prompt,
                "... and {} more {noun}",
                rows.len() - ANALYSIS_SAMPLE_ROWS
            );
        }
    }
    let _ = write!(prompt, "\n{}", kind.focus());
    prompt
}

/// Prompt asking for task-to-worker allocation suggestions.
///
/// Unlike the rule prompt this sends every row: allocation needs the values.
pub fn allocation_prompt(workbook: &Workbook) -> String {
    let data = serde_json::to_string_pretty(workbook).unwrap_or_else(|_| "{}".to_string());
    format!(
        r#"You are a workforce allocation optimizer. Provide specific, actionable task assignments.

Based on this workforce data, suggest optimal task allocations:

{data}

Provide specific allocation recommendations in the following format:
- Task ID -> Worker ID (Reason)
- Include phase assignments where applicable
- Consider priority levels, skill matches, and capacity constraints"#
    )
}
