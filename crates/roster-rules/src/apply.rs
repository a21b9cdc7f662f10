//! Filter and rule application.

use tracing::{debug, info};

use roster_model::{EntityKind, Row, Workbook};

use crate::compiler::{Predicate, Transform};
use crate::error::RuleApplicationError;

/// Rows for which the predicate holds, in their original order.
pub fn apply_filter(rows: &[Row], predicate: &Predicate) -> Vec<Row> {
    let matched: Vec<Row> = rows
        .iter()
        .filter(|row| predicate.matches(row))
        .cloned()
        .collect();
    debug!(
        rows = rows.len(),
        matched = matched.len(),
        "filter applied"
    );
    matched
}

/// Run a transform over all three datasets.
///
/// Returns the replacement workbook; on error the caller keeps its current
/// datasets, since nothing is written back until the transform succeeds.
pub fn apply_rule(
    workbook: &Workbook,
    transform: &Transform,
) -> Result<Workbook, RuleApplicationError> {
    let next = transform.run(workbook)?;
    info!(
        clients = next.row_count(EntityKind::Clients),
        workers = next.row_count(EntityKind::Workers),
        tasks = next.row_count(EntityKind::Tasks),
        "rule applied"
    );
    Ok(next)
}

/// Apply a transform to a workbook in place, all or nothing.
pub fn apply_rule_in_place(
    workbook: &mut Workbook,
    transform: &Transform,
) -> Result<(), RuleApplicationError> {
    let next = apply_rule(workbook, transform)?;
    workbook.replace_all(next);
    Ok(())
}
