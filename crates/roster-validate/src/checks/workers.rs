//! Worker sheet checks.

use std::collections::HashSet;

use roster_model::{
    DataType, EntityKind, Row, ValidationReport, ValidationThresholds, format_number, schema,
};

use crate::fields::{RowRef, check_count, check_identity, check_level, check_list, check_phase_entries};

/// Validate every worker row.
pub fn check(rows: &[Row], thresholds: &ValidationThresholds) -> ValidationReport {
    let schema = schema(EntityKind::Workers);
    let mut report = ValidationReport::new();
    let mut seen_ids = HashSet::new();

    for (index, row) in rows.iter().enumerate() {
        let at = RowRef::new(index, row, schema);
        check_identity(row, &at, schema, &mut seen_ids, &mut report);

        if let Some(skills) = check_list(row, &at, "Skills", DataType::StringList, &mut report)
            && skills.is_empty()
        {
            report.warning(format!("{}: Worker has no skills defined", at.prefix()));
        }

        if let Some(slots) =
            check_list(row, &at, "AvailableSlots", DataType::NumberList, &mut report)
        {
            check_phase_entries(&slots, &at, "AvailableSlots", &mut report);
            if slots.len() < thresholds.min_available_slots {
                report.warning(format!(
                    "{}: Worker has limited availability ({} slots)",
                    at.prefix(),
                    slots.len()
                ));
            }
        }

        if let Some(max_load) = check_count(
            row,
            &at,
            "MaxLoadPerPhase",
            0.0,
            "a non-negative integer",
            &mut report,
        ) && max_load > thresholds.max_load_per_phase
        {
            report.warning(format!(
                "{}: Worker has high MaxLoadPerPhase ({})",
                at.prefix(),
                format_number(max_load)
            ));
        }

        if let Some(level) = check_level(row, &at, "QualificationLevel", 1, 5, &mut report)
            && level < thresholds.low_qualification_below
        {
            report.warning(format!(
                "{}: Worker has low qualification level ({level})",
                at.prefix()
            ));
        }
    }

    report
}
