//! Error types for generation, compilation and rule application.

use std::time::Duration;

use thiserror::Error;

use roster_model::EntityKind;

/// Failure of the external text-generation service or of its inputs.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Missing description, rule name or column metadata.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("API key not set: environment variable {0} is empty or missing")]
    MissingApiKey(String),

    /// Network or transport failure.
    #[error("generation request failed: {0}")]
    Request(String),

    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("malformed generation response: {0}")]
    MalformedResponse(String),

    #[error("generation service returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

/// Code that does not compile into a callable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("code is empty")]
    Empty,

    #[error("syntax error: {0}")]
    Syntax(String),

    /// Transform scripts must define `ruleFunction` with three parameters or return a value.
    #[error("invalid rule function: {0}")]
    InvalidFunction(String),
}

/// A compiled transform failed or returned something other than three datasets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleApplicationError {
    #[error("{} data is missing", .0.label())]
    MissingDataset(EntityKind),

    #[error("rule failed: {0}")]
    Runtime(String),

    #[error("rule returned a malformed result: {0}")]
    MalformedResult(String),
}

/// Rule book operations.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule name is required")]
    MissingName,

    #[error("a rule named '{0}' already exists")]
    DuplicateName(String),

    #[error("rule '{0}' needs code or a description")]
    MissingSource(String),

    #[error("rule '{0}' not found")]
    NotFound(String),

    #[error("failed to generate rule '{name}': {source}")]
    Generation {
        name: String,
        #[source]
        source: GenerationError,
    },

    #[error("rule '{name}' does not compile: {source}")]
    Compile {
        name: String,
        #[source]
        source: CompileError,
    },

    #[error("rule '{name}' failed: {source}")]
    Application {
        name: String,
        #[source]
        source: RuleApplicationError,
    },
}

/// Filter pipeline failures. A bad filter never falls back to the unfiltered rows.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] CompileError),
}
