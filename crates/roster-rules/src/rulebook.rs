//! Named rule storage.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use roster_model::Workbook;

use crate::apply::apply_rule;
use crate::compiler::{Compiler, Transform};
use crate::error::RuleError;
use crate::generator::{CodeGenerator, TextGenerator};

/// A request to add a rule: literal code, a description to generate from, or both.
///
/// Code takes precedence; the description is then kept as documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleRequest {
    pub name: String,
    pub description: Option<String>,
    pub code: Option<String>,
}

impl RuleRequest {
    pub fn from_code(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            code: Some(code.into()),
        }
    }

    pub fn from_description(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            code: None,
        }
    }

    fn code(&self) -> Option<&str> {
        self.code.as_deref().map(str::trim).filter(|code| !code.is_empty())
    }

    fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty())
    }
}

/// A registered rule and its compiled transform.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRule {
    pub name: String,
    pub description: Option<String>,
    pub code: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    transform: Transform,
}

impl StoredRule {
    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

/// In-memory rules keyed by name. Names are unique; nothing is overwritten.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    rules: BTreeMap<String, StoredRule>,
    compiler: Compiler,
}

impl RuleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compiler(compiler: Compiler) -> Self {
        Self {
            rules: BTreeMap::new(),
            compiler,
        }
    }

    /// Name and source checks that run before any generation or compile cost.
    fn check_request(&self, request: &RuleRequest) -> Result<String, RuleError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(RuleError::MissingName);
        }
        if self.rules.contains_key(name) {
            debug!(rule = name, "rejecting duplicate rule name");
            return Err(RuleError::DuplicateName(name.to_string()));
        }
        if request.code().is_none() && request.description().is_none() {
            return Err(RuleError::MissingSource(name.to_string()));
        }
        Ok(name.to_string())
    }

    fn store(
        &mut self,
        name: String,
        description: Option<String>,
        code: String,
    ) -> Result<&StoredRule, RuleError> {
        let transform = self
            .compiler
            .compile_transform(&code)
            .map_err(|source| RuleError::Compile {
                name: name.clone(),
                source,
            })?;
        info!(rule = %name, "rule registered");
        let rule = StoredRule {
            name: name.clone(),
            description,
            code,
            created_at: Utc::now(),
            transform,
        };
        Ok(self.rules.entry(name).or_insert(rule))
    }

    /// Register a rule from literal code. No generation is attempted.
    pub fn add_rule_code(&mut self, request: RuleRequest) -> Result<&StoredRule, RuleError> {
        let name = self.check_request(&request)?;
        let Some(code) = request.code() else {
            return Err(RuleError::MissingSource(name));
        };
        let code = code.to_string();
        let description = request.description().map(str::to_string);
        self.store(name, description, code)
    }

    /// Register a rule, generating its code from the description when no code is given.
    ///
    /// Checks run in order: name present, name unused, code or description
    /// present, generation, compilation. A rule that does not compile is not stored.
    pub async fn add_rule<G: TextGenerator>(
        &mut self,
        request: RuleRequest,
        generator: &CodeGenerator<G>,
        workbook: &Workbook,
    ) -> Result<&StoredRule, RuleError> {
        let name = self.check_request(&request)?;
        let description = request.description().map(str::to_string);
        let code = match (request.code(), description.as_deref()) {
            (Some(code), _) => code.to_string(),
            (None, Some(description)) => {
                generator
                    .generate_rule_code(&name, description, workbook)
                    .await
                    .map_err(|source| RuleError::Generation {
                        name: name.clone(),
                        source,
                    })?
                    .rule_code
            }
            (None, None) => return Err(RuleError::MissingSource(name)),
        };
        self.store(name, description, code)
    }

    /// Run a stored rule, returning the replacement workbook.
    pub fn apply(&self, name: &str, workbook: &Workbook) -> Result<Workbook, RuleError> {
        let rule = self
            .rules
            .get(name)
            .ok_or_else(|| RuleError::NotFound(name.to_string()))?;
        apply_rule(workbook, &rule.transform).map_err(|source| RuleError::Application {
            name: name.to_string(),
            source,
        })
    }

    pub fn remove(&mut self, name: &str) -> Option<StoredRule> {
        self.rules.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&StoredRule> {
        self.rules.get(name)
    }

    /// Rule names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules document: every rule's name, description, code and creation time.
    pub fn export_document(&self) -> serde_json::Value {
        let rules: Vec<&StoredRule> = self.rules.values().collect();
        serde_json::json!({ "rules": rules })
    }
}
