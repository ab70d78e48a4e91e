//! Content Service
//!
//! Turns a learning mode and topic reference into a single generation call
//! and normalizes whatever comes back into [`GeneratedContent`]. Every
//! failure is absorbed here and surfaced as user-facing text, so callers
//! never see an error.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::api::types::{GenerateContentRequest, GenerationConfig, Schema};
use crate::api::{ApiKey, GeminiClient, GenerativeModel};
use crate::config::Config;
use crate::content::{self, GeneratedContent, LearningMode};
use crate::prompts;
use crate::syllabus;
use crate::telemetry::{log_excerpt, track_generation};

pub const MISSING_KEY_MESSAGE: &str = "API Key is missing. Please configure process.env.API_KEY.";
pub const SERVICE_ERROR_MESSAGE: &str = "Error communicating with the CEH Coach. Please try again.";
pub const PARSE_ERROR_MESSAGE: &str = "Could not parse the CEH Coach response. Please try again.";
pub const NO_CONTENT_MESSAGE: &str = "No content generated.";
pub const NO_ANSWER_MESSAGE: &str = "No answer generated.";

/// Whether `text` is one of the messages that stand in for a failed request.
pub fn is_failure_message(text: &str) -> bool {
    [MISSING_KEY_MESSAGE, SERVICE_ERROR_MESSAGE, PARSE_ERROR_MESSAGE].contains(&text)
}

/// Per-request generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: None,
            max_output_tokens: None,
        }
    }
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            temperature: Some(config.temperature),
            max_output_tokens: Some(config.max_output_tokens),
        }
    }
}

pub struct ContentService {
    backend: Arc<dyn GenerativeModel>,
    credential: Option<ApiKey>,
    settings: GenerationSettings,
    system_instruction: String,
}

impl ContentService {
    pub fn new(
        backend: Arc<dyn GenerativeModel>,
        credential: Option<ApiKey>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            backend,
            credential,
            settings,
            system_instruction: prompts::system_instruction(&syllabus::system_context()),
        }
    }

    /// Wire the HTTP client and credential from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = GeminiClient::new(config)?;
        let credential = config.api_key().and_then(ApiKey::new);
        Ok(Self::new(
            Arc::new(client),
            credential,
            GenerationSettings::from_config(config),
        ))
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Generate learning material for one subtopic.
    pub async fn generate(
        &self,
        mode: LearningMode,
        module_title: &str,
        subtopic_title: &str,
    ) -> GeneratedContent {
        let Some(key) = self.credential.as_ref() else {
            warn!("No API key configured, skipping generation");
            return GeneratedContent::Text(MISSING_KEY_MESSAGE.to_string());
        };

        info!(
            mode = %mode,
            module = log_excerpt(module_title).as_str(),
            subtopic = log_excerpt(subtopic_title).as_str(),
            "Generating content"
        );

        let prompt = prompts::content_prompt(mode, module_title, subtopic_title);
        let request = self.build_request(prompt, prompts::schema_for(mode));
        let payload = match self.call(mode.label(), key, request).await {
            Some(payload) => payload,
            None => return GeneratedContent::Text(SERVICE_ERROR_MESSAGE.to_string()),
        };

        let result = match mode {
            LearningMode::Quiz => content::parse_quiz(&payload).map(GeneratedContent::Quiz),
            LearningMode::Flashcards => {
                content::parse_flashcards(&payload).map(GeneratedContent::Flashcards)
            }
            LearningMode::Lesson | LearningMode::Summary => {
                if payload.trim().is_empty() {
                    Ok(GeneratedContent::Text(NO_CONTENT_MESSAGE.to_string()))
                } else {
                    Ok(GeneratedContent::Text(payload))
                }
            }
        };

        match result {
            Ok(content) => content,
            Err(e) => {
                error!(mode = %mode, error = %e, "Structured response failed validation");
                GeneratedContent::Text(PARSE_ERROR_MESSAGE.to_string())
            }
        }
    }

    /// Answer a free-form question within syllabus scope.
    pub async fn ask(&self, query: &str) -> String {
        let Some(key) = self.credential.as_ref() else {
            warn!("No API key configured, skipping question");
            return MISSING_KEY_MESSAGE.to_string();
        };

        info!(query = log_excerpt(query).as_str(), "Answering question");
        let request = self.build_request(prompts::question_prompt(query), None);
        match self.call("ask", key, request).await {
            Some(answer) if !answer.trim().is_empty() => answer,
            Some(_) => NO_ANSWER_MESSAGE.to_string(),
            None => SERVICE_ERROR_MESSAGE.to_string(),
        }
    }

    fn build_request(&self, prompt: String, schema: Option<Schema>) -> GenerateContentRequest {
        let mut generation = match schema {
            Some(schema) => GenerationConfig::json(schema),
            None => GenerationConfig::default(),
        };
        generation.temperature = self.settings.temperature;
        generation.max_output_tokens = self.settings.max_output_tokens;

        let request = GenerateContentRequest::prompt(prompt)
            .with_system_instruction(self.system_instruction.clone());
        if generation == GenerationConfig::default() {
            request
        } else {
            request.with_generation_config(generation)
        }
    }

    /// One provider call. `None` means the call failed; an empty string
    /// means the provider sent no text.
    async fn call(
        &self,
        operation: &str,
        key: &ApiKey,
        request: GenerateContentRequest,
    ) -> Option<String> {
        let backend = &self.backend;
        let model = self.settings.model.as_str();
        let outcome =
            track_generation(operation, || backend.generate_content(key, model, request)).await;

        match outcome {
            Ok(response) => {
                if let Some(usage) = &response.usage_metadata {
                    debug!(
                        prompt_tokens = usage.prompt_token_count,
                        output_tokens = usage.candidates_token_count,
                        "Token usage"
                    );
                }
                Some(response.text().unwrap_or_default())
            }
            Err(e) => {
                error!(operation, error = %log_excerpt(&format!("{:#}", e)), "Generation API error");
                None
            }
        }
    }
}

impl std::fmt::Debug for ContentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService")
            .field("model", &self.settings.model)
            .field("has_credential", &self.has_credential())
            .finish()
    }
}
