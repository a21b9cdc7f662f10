//! Describe-or-code filtering of one dataset.

use tracing::info;

use roster_model::{EntityKind, Row, observed_columns};

use crate::apply::apply_filter;
use crate::compiler::Compiler;
use crate::error::FilterError;
use crate::generator::{CodeGenerator, TextGenerator};

/// Result of a filter run.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Code the rows were filtered with.
    pub code: String,
    pub rows: Vec<Row>,
}

/// Columns and declared type descriptions sent with a filter prompt.
///
/// Columns come from the data itself, falling back to the schema for an
/// empty dataset. Undeclared columns are described as strings.
pub fn filter_columns(kind: EntityKind, rows: &[Row]) -> (Vec<String>, Vec<String>) {
    let schema = kind.schema();
    let mut columns = observed_columns(rows);
    if columns.is_empty() {
        columns = schema
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
    }
    let data_types = columns
        .iter()
        .map(|column| {
            schema
                .data_type(column)
                .map_or("string", |data_type| data_type.describe())
                .to_string()
        })
        .collect();
    (columns, data_types)
}

/// Compile literal predicate code and apply it to `rows`.
///
/// Uncompilable code is an error, never a no-op that keeps every row.
pub fn filter_rows(compiler: &Compiler, rows: &[Row], code: &str) -> Result<FilterOutcome, FilterError> {
    let predicate = compiler.compile_predicate(code)?;
    let matched = apply_filter(rows, &predicate);
    Ok(FilterOutcome {
        code: code.trim().to_string(),
        rows: matched,
    })
}

/// Generate, compile and apply filters.
#[derive(Debug, Clone)]
pub struct FilterPipeline<G> {
    generator: CodeGenerator<G>,
    compiler: Compiler,
}

impl<G: TextGenerator> FilterPipeline<G> {
    pub fn new(generator: CodeGenerator<G>) -> Self {
        Self {
            generator,
            compiler: Compiler::new(),
        }
    }

    pub fn with_compiler(generator: CodeGenerator<G>, compiler: Compiler) -> Self {
        Self {
            generator,
            compiler,
        }
    }

    /// Filter with literal predicate code. See [`filter_rows`].
    pub fn filter_with_code(&self, rows: &[Row], code: &str) -> Result<FilterOutcome, FilterError> {
        filter_rows(&self.compiler, rows, code)
    }

    /// Generate a predicate from a description, then compile and apply it.
    pub async fn filter_with_description(
        &self,
        kind: EntityKind,
        rows: &[Row],
        description: &str,
    ) -> Result<FilterOutcome, FilterError> {
        let (columns, data_types) = filter_columns(kind, rows);
        let code = self
            .generator
            .generate_filter_code(&columns, &data_types, description)
            .await?;
        let outcome = self.filter_with_code(rows, &code)?;
        info!(
            entity = %kind,
            rows = rows.len(),
            matched = outcome.rows.len(),
            "filter from description applied"
        );
        Ok(outcome)
    }
}
