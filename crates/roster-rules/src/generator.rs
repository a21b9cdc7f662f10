//! Text-generation adapter for filter and rule code, analyses and allocation suggestions.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use roster_model::{EntityKind, Workbook};

use crate::error::GenerationError;
use crate::prompt::{AnalysisKind, allocation_prompt, analysis_prompt, filter_prompt, rule_prompt};

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Budget for one generation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An external text-generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a prompt, returning the first text segment of the response.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;
}

/// Connection settings for [`OpenAiGenerator`].
#[derive(Clone)]
pub struct GeneratorSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GeneratorSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeneratorSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the API key from the named environment variable.
    pub fn from_env(api_key_env: &str) -> Result<Self, GenerationError> {
        match std::env::var(api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(GenerationError::MissingApiKey(api_key_env.to_string())),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for an OpenAI-compatible Responses endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: reqwest::Client,
    settings: GeneratorSettings,
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ResponsesBody {
    #[serde(default)]
    output: Vec<OutputItem>,
}

impl OpenAiGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.settings.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&ResponsesRequest {
                model: &self.settings.model,
                input: prompt,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }

        let text = response.text().await?;
        let body: ResponsesBody = serde_json::from_str(&text)
            .map_err(|err| GenerationError::MalformedResponse(err.to_string()))?;
        body.output
            .into_iter()
            .next()
            .and_then(|item| item.content.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                GenerationError::MalformedResponse("missing output[0].content[0].text".to_string())
            })
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

/// A generated rule, ready for compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRule {
    pub rule_name: String,
    pub rule_description: String,
    pub rule_code: String,
}

/// Builds prompts and turns completions into code strings.
///
/// Output is returned trimmed but otherwise verbatim; syntax problems surface
/// when the code is compiled.
#[derive(Debug, Clone)]
pub struct CodeGenerator<G> {
    generator: G,
    timeout: Duration,
}

impl<G: TextGenerator> CodeGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let started = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, self.generator.complete(prompt)).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => {
                warn!(model = self.generator.model(), elapsed_ms, error = %err, "generation failed");
                return Err(err);
            }
            Err(_) => {
                warn!(model = self.generator.model(), elapsed_ms, "generation timed out");
                return Err(GenerationError::Timeout(self.timeout));
            }
        };
        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        info!(model = self.generator.model(), elapsed_ms, chars = text.len(), "text generated");
        Ok(text.to_string())
    }

    /// Generate a boolean filter expression over `row`.
    pub async fn generate_filter_code(
        &self,
        columns: &[String],
        data_types: &[String],
        description: &str,
    ) -> Result<String, GenerationError> {
        if description.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "filter description is required".to_string(),
            ));
        }
        if columns.len() != data_types.len() {
            return Err(GenerationError::InvalidInput(format!(
                "{} columns but {} data types",
                columns.len(),
                data_types.len()
            )));
        }
        let prompt = filter_prompt(columns, data_types, description);
        debug!(columns = columns.len(), "requesting filter code");
        self.complete(&prompt).await
    }

    /// Generate a `ruleFunction` transform for the workbook's datasets.
    pub async fn generate_rule_code(
        &self,
        rule_name: &str,
        description: &str,
        workbook: &Workbook,
    ) -> Result<GeneratedRule, GenerationError> {
        if rule_name.trim().is_empty() || description.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "rule name and description are required".to_string(),
            ));
        }
        let prompt = rule_prompt(description, workbook);
        debug!(rule = rule_name, "requesting rule code");
        let rule_code = self.complete(&prompt).await?;
        Ok(GeneratedRule {
            rule_name: rule_name.trim().to_string(),
            rule_description: description.trim().to_string(),
            rule_code,
        })
    }

    /// Written analysis of the workbook with the given focus.
    ///
    /// All three datasets must be present.
    pub async fn analyze(
        &self,
        workbook: &Workbook,
        kind: AnalysisKind,
    ) -> Result<String, GenerationError> {
        require_complete(workbook)?;
        let prompt = analysis_prompt(workbook, kind);
        debug!(analysis = %kind, "requesting analysis");
        self.complete(&prompt).await
    }

    /// Suggested task-to-worker allocations, one `Task ID -> Worker ID (Reason)` line each.
    ///
    /// All three datasets must be present. The reply is returned as text and
    /// is not parsed or checked against the workbook.
    pub async fn suggest_allocations(&self, workbook: &Workbook) -> Result<String, GenerationError> {
        require_complete(workbook)?;
        let prompt = allocation_prompt(workbook);
        debug!(
            tasks = workbook.row_count(EntityKind::Tasks),
            workers = workbook.row_count(EntityKind::Workers),
            "requesting allocation suggestions"
        );
        self.complete(&prompt).await
    }
}

fn require_complete(workbook: &Workbook) -> Result<(), GenerationError> {
    let missing: Vec<&str> = EntityKind::ALL
        .into_iter()
        .filter(|kind| workbook.dataset(*kind).is_none())
        .map(EntityKind::dataset_key)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(GenerationError::InvalidInput(format!(
            "missing required data: {}",
            missing.join(", ")
        )))
    }
}
