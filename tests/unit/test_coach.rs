//! Unit tests for the content service
//!
//! Tests cover:
//! - Missing credential short-circuits without a provider call
//! - Text, quiz, and flashcard generation
//! - Failure and empty-answer fallbacks
//! - Request shape (system instruction, JSON schema)

use std::sync::Arc;

use ceh_coach::coach::{
    is_failure_message, MISSING_KEY_MESSAGE, NO_ANSWER_MESSAGE, PARSE_ERROR_MESSAGE,
    SERVICE_ERROR_MESSAGE,
};
use ceh_coach::content::{GeneratedContent, LearningMode};
use ceh_coach::prompts::OUT_OF_SCOPE_REPLY;

use super::support::{keyless_service, service_with, ScriptedModel, LESSON_TEXT};

const MODULE: &str = "Footprinting and Reconnaissance";
const SUBTOPIC: &str = "WHOIS Lookup";

#[tokio::test]
async fn test_missing_key_makes_no_call() {
    let model = Arc::new(ScriptedModel::new());
    let service = keyless_service(Arc::clone(&model));

    for mode in LearningMode::ALL {
        let content = service.generate(mode, MODULE, SUBTOPIC).await;
        assert_eq!(content, GeneratedContent::Text(MISSING_KEY_MESSAGE.into()));
    }
    assert_eq!(service.ask("What is OSINT?").await, MISSING_KEY_MESSAGE);
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_lesson_returns_text() {
    let model = Arc::new(ScriptedModel::new());
    let service = service_with(Arc::clone(&model));

    let content = service.generate(LearningMode::Lesson, MODULE, SUBTOPIC).await;
    assert_eq!(content.as_text(), Some(LESSON_TEXT));
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_quiz_returns_validated_questions() {
    let service = service_with(Arc::new(ScriptedModel::new()));

    match service.generate(LearningMode::Quiz, MODULE, SUBTOPIC).await {
        GeneratedContent::Quiz(questions) => {
            assert_eq!(questions.len(), 2);
            assert!(questions.iter().all(|q| q.options.len() == 4));
            assert_eq!(questions[1].correct_option(), Some("22"));
        }
        other => panic!("expected quiz, got {:?}", other),
    }
}

#[tokio::test]
async fn test_flashcards_returned_in_order() {
    let service = service_with(Arc::new(ScriptedModel::new()));

    match service
        .generate(LearningMode::Flashcards, MODULE, SUBTOPIC)
        .await
    {
        GeneratedContent::Flashcards(cards) => {
            let terms: Vec<&str> = cards.iter().map(|c| c.term.as_str()).collect();
            assert_eq!(terms, ["OSINT", "WHOIS", "DNS"]);
        }
        other => panic!("expected flashcards, got {:?}", other),
    }
}

#[tokio::test]
async fn test_provider_failure_degrades_to_message() {
    let service = service_with(Arc::new(ScriptedModel::failing()));

    let content = service.generate(LearningMode::Quiz, MODULE, SUBTOPIC).await;
    assert_eq!(content, GeneratedContent::Text(SERVICE_ERROR_MESSAGE.into()));
    assert_eq!(service.ask("anything").await, SERVICE_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_blank_answer_becomes_no_answer() {
    let service = service_with(Arc::new(ScriptedModel::with_answer("   ")));
    assert_eq!(service.ask("What is a botnet?").await, NO_ANSWER_MESSAGE);
}

#[tokio::test]
async fn test_answer_passes_through() {
    let service = service_with(Arc::new(ScriptedModel::with_answer(OUT_OF_SCOPE_REPLY)));
    assert_eq!(service.ask("Best pizza in town?").await, OUT_OF_SCOPE_REPLY);
}

#[tokio::test]
async fn test_every_request_carries_syllabus_instruction() {
    let model = Arc::new(ScriptedModel::new());
    let service = service_with(Arc::clone(&model));

    service.generate(LearningMode::Summary, MODULE, SUBTOPIC).await;
    service.ask("Explain SYN scans").await;

    for (model_id, request) in model.requests() {
        assert_eq!(model_id, "gemini-2.5-flash");
        let system = request.system_text().unwrap();
        assert_eq!(system, service.system_instruction());
        assert!(system.contains("Module 3: Phase 1: Footprinting and Passive Reconnaissance"));
    }
}

#[tokio::test]
async fn test_structured_modes_request_json() {
    let model = Arc::new(ScriptedModel::new());
    let service = service_with(Arc::clone(&model));

    service.generate(LearningMode::Quiz, MODULE, SUBTOPIC).await;
    service.generate(LearningMode::Lesson, MODULE, SUBTOPIC).await;

    let requests = model.requests();
    let quiz_config = requests[0].1.generation_config.as_ref().unwrap();
    assert_eq!(
        quiz_config.response_mime_type.as_deref(),
        Some("application/json")
    );
    assert!(quiz_config.response_schema.is_some());
    assert!(requests[1].1.generation_config.is_none());
    assert!(requests[0].1.prompt_text().unwrap().contains(SUBTOPIC));
}

#[test]
fn test_failure_messages_recognized() {
    assert!(is_failure_message(MISSING_KEY_MESSAGE));
    assert!(is_failure_message(SERVICE_ERROR_MESSAGE));
    assert!(is_failure_message(PARSE_ERROR_MESSAGE));
    assert!(!is_failure_message(NO_ANSWER_MESSAGE));
    assert!(!is_failure_message(LESSON_TEXT));
}

#[test]
fn test_missing_key_outside_runtime() {
    let model = Arc::new(ScriptedModel::new());
    let service = keyless_service(Arc::clone(&model));

    let answer = tokio_test::block_on(service.ask("What is enumeration?"));
    assert_eq!(answer, MISSING_KEY_MESSAGE);
    assert_eq!(model.calls(), 0);
}
