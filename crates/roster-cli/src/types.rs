use std::path::PathBuf;

use roster_model::{EntityKind, Row, ValidationReport};
use roster_rules::AnalysisKind;

/// Rows loaded per sheet; `None` when the sheet was not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetCount {
    pub kind: EntityKind,
    pub rows: Option<usize>,
}

#[derive(Debug)]
pub struct ValidateResult {
    pub source: PathBuf,
    pub sheets: Vec<SheetCount>,
    pub report: ValidationReport,
}

#[derive(Debug)]
pub struct FilterResult {
    pub kind: EntityKind,
    pub total: usize,
    pub code: String,
    pub rows: Vec<Row>,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RuleResult {
    pub name: String,
    pub code: String,
    pub output_dir: PathBuf,
    pub before: Vec<SheetCount>,
    pub after: Vec<SheetCount>,
    pub files: Vec<PathBuf>,
    pub report: ValidationReport,
}

/// Generated prose about a folder of sheets.
#[derive(Debug)]
pub struct AnalysisResult {
    pub folder: PathBuf,
    /// `None` for allocation suggestions.
    pub kind: Option<AnalysisKind>,
    pub sheets: Vec<SheetCount>,
    pub text: String,
}
