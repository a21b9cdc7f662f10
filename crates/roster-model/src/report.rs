use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

impl IssueSeverity {
    pub fn label(self) -> &'static str {
        match self {
            IssueSeverity::Error => "Error",
            IssueSeverity::Warning => "Warning",
        }
    }
}

/// Outcome of a validation pass.
///
/// `valid` always equals `errors.is_empty()`; warnings never affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Report carrying a single top-level error.
    pub fn rejected(message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.error(message);
        report
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.valid = false;
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Append another report's messages, keeping order.
    pub fn absorb(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.valid = self.errors.is_empty();
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Messages tagged with severity, errors first.
    pub fn issues(&self) -> impl Iterator<Item = (IssueSeverity, &str)> {
        self.errors
            .iter()
            .map(|message| (IssueSeverity::Error, message.as_str()))
            .chain(
                self.warnings
                    .iter()
                    .map(|message| (IssueSeverity::Warning, message.as_str())),
            )
    }
}
