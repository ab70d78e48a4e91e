//! Scripted generative model shared by the unit tests.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use ceh_coach::api::types::{GenerateContentRequest, GenerateContentResponse};
use ceh_coach::api::{ApiKey, GenerativeModel};
use ceh_coach::coach::{ContentService, GenerationSettings};

pub const LESSON_TEXT: &str = "**Definition**: Footprinting is passive information gathering.";

pub const QUIZ_JSON: &str = r#"[
  {"question": "Which tool performs WHOIS lookups?", "options": ["whois", "nmap", "hydra", "john"], "correctAnswerIndex": 0, "explanation": "whois queries registrars."},
  {"question": "Which port does SSH use?", "options": ["21", "22", "23", "25"], "correctAnswerIndex": 1, "explanation": "SSH listens on 22."}
]"#;

pub const FLASHCARDS_JSON: &str = r#"[
  {"term": "OSINT", "definition": "Open Source Intelligence"},
  {"term": "WHOIS", "definition": "Domain registration lookup"},
  {"term": "DNS", "definition": "Domain Name System"}
]"#;

/// Answers by request kind: quiz and flashcard prompts get their JSON
/// fixtures, everything else gets plain text. Fails every call when
/// `failing` is set.
pub struct ScriptedModel {
    failing: bool,
    answer: String,
    seen: Mutex<Vec<(String, GenerateContentRequest)>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self {
            failing: false,
            answer: "Reconnaissance, scanning, gaining access, maintaining access, clearing tracks."
                .to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub fn with_answer(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<(String, GenerateContentRequest)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_content(
        &self,
        _api_key: &ApiKey,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.seen
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));
        if self.failing {
            anyhow::bail!("scripted failure");
        }

        let prompt = request.prompt_text().unwrap_or_default();
        let text = if prompt.contains("multiple choice") {
            QUIZ_JSON
        } else if prompt.contains("flashcards") {
            FLASHCARDS_JSON
        } else if prompt.starts_with("Teach me") || prompt.starts_with("Provide a concise") {
            LESSON_TEXT
        } else {
            self.answer.as_str()
        };
        Ok(GenerateContentResponse::from_text(text))
    }
}

pub fn service_with(model: Arc<ScriptedModel>) -> ContentService {
    ContentService::new(
        model,
        ApiKey::new("test-key"),
        GenerationSettings::default(),
    )
}

pub fn keyless_service(model: Arc<ScriptedModel>) -> ContentService {
    ContentService::new(model, None, GenerationSettings::default())
}
