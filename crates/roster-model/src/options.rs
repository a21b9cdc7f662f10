//! Advisory thresholds for field validation.

use serde::{Deserialize, Serialize};

/// Limits past which a value is accepted but flagged with a warning.
///
/// These never turn a value into an error; range errors are fixed by the
/// data model (priority and qualification within 1-5, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationThresholds {
    /// PriorityLevel at or above this is a high-priority client.
    pub high_priority_from: i64,
    /// More requested tasks than this is flagged.
    pub max_requested_tasks: usize,
    /// Fewer available slots than this is limited availability.
    pub min_available_slots: usize,
    pub max_load_per_phase: f64,
    /// QualificationLevel below this is a low qualification.
    pub low_qualification_below: i64,
    /// Duration (in phases) above this is a long task.
    pub max_duration: f64,
    pub max_required_skills: usize,
    pub max_concurrent: f64,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            high_priority_from: 4,
            max_requested_tasks: 5,
            min_available_slots: 3,
            max_load_per_phase: 5.0,
            low_qualification_below: 3,
            max_duration: 8.0,
            max_required_skills: 3,
            max_concurrent: 3.0,
        }
    }
}
