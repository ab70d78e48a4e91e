//! Generated Content
//!
//! Learning modes and the result shapes a generation request produces, plus
//! validation of the structured payloads the provider returns. Provider
//! output is treated as untrusted: it is parsed entry by entry and anything
//! that would break the quiz invariants is dropped.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CoachError, Result};
use crate::telemetry::log_excerpt;

/// Questions requested per quiz.
pub const QUIZ_QUESTION_COUNT: usize = 5;
/// Options every quiz question must carry.
pub const QUIZ_OPTION_COUNT: usize = 4;
/// Cards requested per flashcard deck.
pub const FLASHCARD_COUNT: usize = 8;

/// Style of generated material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LearningMode {
    /// Six-part structured explanation
    #[default]
    Lesson,
    /// Concise bullet-point summary
    Summary,
    /// Five multiple-choice questions
    Quiz,
    /// Eight term/definition cards
    Flashcards,
}

impl LearningMode {
    pub const ALL: [LearningMode; 4] = [
        LearningMode::Lesson,
        LearningMode::Summary,
        LearningMode::Quiz,
        LearningMode::Flashcards,
    ];

    /// Title-case name for headers.
    pub fn label(self) -> &'static str {
        match self {
            LearningMode::Lesson => "Lesson",
            LearningMode::Summary => "Summary",
            LearningMode::Quiz => "Quiz",
            LearningMode::Flashcards => "Flashcards",
        }
    }

    /// Whether the provider is asked for schema-constrained JSON.
    pub fn is_structured(self) -> bool {
        matches!(self, LearningMode::Quiz | LearningMode::Flashcards)
    }
}

impl std::fmt::Display for LearningMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LearningMode::Lesson => write!(f, "lesson"),
            LearningMode::Summary => write!(f, "summary"),
            LearningMode::Quiz => write!(f, "quiz"),
            LearningMode::Flashcards => write!(f, "flashcards"),
        }
    }
}

impl std::str::FromStr for LearningMode {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lesson" | "l" => Ok(LearningMode::Lesson),
            "summary" | "s" => Ok(LearningMode::Summary),
            "quiz" | "q" => Ok(LearningMode::Quiz),
            "flashcards" | "flashcard" | "cards" | "f" => Ok(LearningMode::Flashcards),
            other => Err(CoachError::Usage(format!("unknown learning mode '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub explanation: String,
}

impl QuizQuestion {
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer_index).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub term: String,
    pub definition: String,
}

/// Result of one generation request. Replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedContent {
    Text(String),
    Quiz(Vec<QuizQuestion>),
    Flashcards(Vec<Flashcard>),
}

impl GeneratedContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            GeneratedContent::Text(text) => Some(text),
            GeneratedContent::Quiz(_) | GeneratedContent::Flashcards(_) => None,
        }
    }

    /// Whether a structured result came back with nothing in it.
    pub fn is_empty_collection(&self) -> bool {
        match self {
            GeneratedContent::Text(_) => false,
            GeneratedContent::Quiz(questions) => questions.is_empty(),
            GeneratedContent::Flashcards(cards) => cards.is_empty(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuizQuestion {
    question: String,
    options: Vec<String>,
    correct_answer_index: i64,
    #[serde(default)]
    explanation: String,
}

#[derive(Debug, Deserialize)]
struct RawFlashcard {
    term: String,
    #[serde(default)]
    definition: String,
}

/// Strip a surrounding markdown code fence, if the provider added one.
fn strip_code_fence(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a JSON array payload, keeping the entries that deserialize.
///
/// An empty payload is an empty collection. A payload that is not a JSON
/// array is an error.
fn parse_entries<T: serde::de::DeserializeOwned>(payload: &str, kind: &str) -> Result<Vec<T>> {
    let body = strip_code_fence(payload);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let values: Vec<serde_json::Value> = serde_json::from_str(body).map_err(|e| {
        warn!(payload = log_excerpt(body).as_str(), "Malformed {} payload", kind);
        CoachError::Parse(e.to_string())
    })?;

    let mut entries = Vec::with_capacity(values.len());
    for (i, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("Dropping {} entry {}: {}", kind, i, e),
        }
    }
    Ok(entries)
}

/// Enforce the quiz invariants on one provider entry.
fn validate_question(raw: RawQuizQuestion) -> Option<QuizQuestion> {
    if raw.question.trim().is_empty() {
        warn!("Dropping quiz question with empty text");
        return None;
    }
    if raw.options.len() < QUIZ_OPTION_COUNT {
        warn!(
            options = raw.options.len(),
            "Dropping quiz question with too few options"
        );
        return None;
    }
    let mut options = raw.options;
    options.truncate(QUIZ_OPTION_COUNT);

    let index = match usize::try_from(raw.correct_answer_index) {
        Ok(i) if i < options.len() => i,
        _ => {
            warn!(
                index = raw.correct_answer_index,
                "Dropping quiz question with out-of-range answer index"
            );
            return None;
        }
    };

    Some(QuizQuestion {
        question: raw.question,
        options,
        correct_answer_index: index,
        explanation: raw.explanation,
    })
}

/// Parse and validate a quiz payload.
pub fn parse_quiz(payload: &str) -> Result<Vec<QuizQuestion>> {
    let raw: Vec<RawQuizQuestion> = parse_entries(payload, "quiz")?;
    let questions: Vec<QuizQuestion> = raw.into_iter().filter_map(validate_question).collect();
    if questions.len() != QUIZ_QUESTION_COUNT {
        debug!(
            "Quiz has {} questions (requested {})",
            questions.len(),
            QUIZ_QUESTION_COUNT
        );
    }
    Ok(questions)
}

/// Parse and validate a flashcard payload.
pub fn parse_flashcards(payload: &str) -> Result<Vec<Flashcard>> {
    let raw: Vec<RawFlashcard> = parse_entries(payload, "flashcard")?;
    let cards: Vec<Flashcard> = raw
        .into_iter()
        .filter(|c| !c.term.trim().is_empty())
        .map(|c| Flashcard {
            term: c.term,
            definition: c.definition,
        })
        .collect();
    if cards.len() != FLASHCARD_COUNT {
        debug!(
            "Deck has {} cards (requested {})",
            cards.len(),
            FLASHCARD_COUNT
        );
    }
    Ok(cards)
}
