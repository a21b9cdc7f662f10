//! Task sheet checks.

use std::collections::HashSet;

use roster_model::{
    DataType, EntityKind, Row, ValidationReport, ValidationThresholds, format_number, schema,
};

use crate::fields::{RowRef, check_count, check_identity, check_list, check_phase_entries};

/// Validate every task row.
pub fn check(rows: &[Row], thresholds: &ValidationThresholds) -> ValidationReport {
    let schema = schema(EntityKind::Tasks);
    let mut report = ValidationReport::new();
    let mut seen_ids = HashSet::new();

    for (index, row) in rows.iter().enumerate() {
        let at = RowRef::new(index, row, schema);
        check_identity(row, &at, schema, &mut seen_ids, &mut report);

        if let Some(duration) =
            check_count(row, &at, "Duration", 1.0, "a positive integer", &mut report)
            && duration > thresholds.max_duration
        {
            report.warning(format!(
                "{}: Task has long duration ({} phases)",
                at.prefix(),
                format_number(duration)
            ));
        }

        if let Some(skills) =
            check_list(row, &at, "RequiredSkills", DataType::StringList, &mut report)
            && skills.len() > thresholds.max_required_skills
        {
            report.warning(format!(
                "{}: Task requires many skills ({})",
                at.prefix(),
                skills.len()
            ));
        }

        if let Some(phases) =
            check_list(row, &at, "PreferredPhases", DataType::NumberList, &mut report)
        {
            if phases.is_empty() {
                report.warning(format!(
                    "{}: Task has no preferred phases defined",
                    at.prefix()
                ));
            }
            check_phase_entries(&phases, &at, "PreferredPhases", &mut report);
        }

        if let Some(max_concurrent) = check_count(
            row,
            &at,
            "MaxConcurrent",
            1.0,
            "a positive integer",
            &mut report,
        ) && max_concurrent > thresholds.max_concurrent
        {
            report.warning(format!(
                "{}: Task has high concurrency ({})",
                at.prefix(),
                format_number(max_concurrent)
            ));
        }
    }

    report
}
