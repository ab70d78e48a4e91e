use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// System instructions carry no role.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    /// Concatenated text of all parts, if any part has text.
    pub fn joined_text(&self) -> Option<String> {
        let texts: Vec<&str> = self.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

/// Primitive kinds accepted in a response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Array,
    Object,
    String,
    Integer,
    Number,
    Boolean,
}

/// Output-shape constraint for structured generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Schema {
    fn leaf(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            items: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::leaf(SchemaType::Integer)
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    /// An object whose listed properties are all required.
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        let mut props = BTreeMap::new();
        let mut required = Vec::new();
        for (name, schema) in properties {
            let name = name.into();
            required.push(name.clone());
            props.insert(name, schema);
        }
        Self {
            properties: props,
            required,
            ..Self::leaf(SchemaType::Object)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    /// Constrain the response to JSON matching `schema`.
    pub fn json(schema: Schema) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn request with a user prompt.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(text)],
            system_instruction: None,
            generation_config: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::system(instruction));
        self
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }

    /// Text of the first user content, used for logging and tests.
    pub fn prompt_text(&self) -> Option<String> {
        self.contents.first().and_then(Content::joined_text)
    }

    pub fn system_text(&self) -> Option<String> {
        self.system_instruction.as_ref().and_then(Content::joined_text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u64,
    #[serde(default)]
    pub candidates_token_count: u64,
    #[serde(default)]
    pub total_token_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Response whose first candidate carries `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part::text(text)],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            usage_metadata: None,
        }
    }

    /// Text payload of the first candidate. `None` when the provider sent
    /// no candidate or no text parts.
    pub fn text(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(Content::joined_text)
    }
}
