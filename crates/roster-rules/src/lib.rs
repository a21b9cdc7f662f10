//! Filter and rule code: generation, sandboxed compilation and application.
//! The same generator also writes workbook analyses and allocation suggestions.
//!
//! A filter is a boolean expression over one `row`; a rule is a transform
//! over all three datasets. Either can be written by hand or generated from
//! a plain-language description by a [`TextGenerator`]. Generated code is
//! compiled by a [`Compiler`] before it ever touches data, and rule results
//! replace a workbook only as a whole.
//!
//! # Example
//!
//! ```ignore
//! use roster_rules::{Compiler, apply_filter};
//!
//! let predicate = Compiler::new().compile_predicate(r#"row.GroupTag == "IT""#)?;
//! let it_clients = apply_filter(&clients, &predicate);
//! ```

mod apply;
mod compiler;
mod error;
mod filter;
mod generator;
mod preprocess;
mod prompt;
mod rulebook;

// === Errors ===
pub use error::{CompileError, FilterError, GenerationError, RuleApplicationError, RuleError};

// === Compilation ===
pub use compiler::{Compiler, CompilerLimits, Predicate, RULE_FUNCTION, Transform, is_truthy};
pub use preprocess::preprocess_code;

// === Application ===
pub use apply::{apply_filter, apply_rule, apply_rule_in_place};

// === Generation ===
pub use generator::{
    CodeGenerator, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT,
    GeneratedRule, GeneratorSettings, OpenAiGenerator, TextGenerator,
};
pub use prompt::{
    ANALYSIS_SAMPLE_ROWS, AnalysisKind, allocation_prompt, analysis_prompt, filter_prompt,
    rule_prompt,
};

// === Rules and Filters ===
pub use filter::{FilterOutcome, FilterPipeline, filter_columns, filter_rows};
pub use rulebook::{RuleBook, RuleRequest, StoredRule};

/// Compile a predicate with a default [`Compiler`].
pub fn compile_predicate(code: &str) -> Result<Predicate, CompileError> {
    Compiler::new().compile_predicate(code)
}

/// Compile a transform with a default [`Compiler`].
pub fn compile_transform(code: &str) -> Result<Transform, CompileError> {
    Compiler::new().compile_transform(code)
}
