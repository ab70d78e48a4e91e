//! Unit tests for the study REPL driven by scripted input
//!
//! Tests cover:
//! - Piped input runs to completion and applies every outstanding request
//! - Superseded requests never overwrite newer content
//! - `exit` stops reading immediately
//! - Missing credential surfaces as content, with no provider call

use std::sync::Arc;

use ceh_coach::coach::MISSING_KEY_MESSAGE;
use ceh_coach::content::LearningMode;
use ceh_coach::repl::{Flow, Repl};
use ceh_coach::study::{ContentView, Slot};

use super::support::{keyless_service, service_with, ScriptedModel, LESSON_TEXT};

#[tokio::test]
async fn test_lesson_applied_at_end_of_input() {
    let model = Arc::new(ScriptedModel::new());
    let mut repl = Repl::new(Arc::new(service_with(Arc::clone(&model))));

    repl.run(&b"open 3\n"[..]).await.unwrap();

    let session = repl.session();
    assert_eq!(session.module().map(|m| m.id), Some(3));
    assert_eq!(
        session.content(),
        &Slot::Ready(ContentView::Text(LESSON_TEXT.to_string()))
    );
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_mode_switch_supersedes_lesson() {
    let model = Arc::new(ScriptedModel::new());
    let mut repl = Repl::new(Arc::new(service_with(Arc::clone(&model))));

    repl.run(&b"open 1\nquiz\n"[..]).await.unwrap();

    let session = repl.session();
    assert_eq!(session.mode(), LearningMode::Quiz);
    match session.content().ready() {
        Some(ContentView::Quiz(attempt)) => assert_eq!(attempt.len(), 2),
        other => panic!("expected quiz, got {:?}", other),
    }
    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn test_search_answer_applied() {
    let model = Arc::new(ScriptedModel::with_answer("OSINT is open source intelligence."));
    let mut repl = Repl::new(Arc::new(service_with(model)));

    repl.run(&b"ask What is OSINT?\n"[..]).await.unwrap();

    assert_eq!(
        repl.session().search(),
        &Slot::Ready("OSINT is open source intelligence.".to_string())
    );
    assert_eq!(repl.session().content(), &Slot::Idle);
}

#[tokio::test]
async fn test_exit_stops_reading() {
    let model = Arc::new(ScriptedModel::new());
    let mut repl = Repl::new(Arc::new(service_with(Arc::clone(&model))));

    repl.run(&b"exit\nopen 1\n"[..]).await.unwrap();

    assert!(repl.session().module().is_none());
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_missing_key_shows_message_as_content() {
    let model = Arc::new(ScriptedModel::new());
    let mut repl = Repl::new(Arc::new(keyless_service(Arc::clone(&model))));

    repl.run(&b"open 1\n"[..]).await.unwrap();

    assert_eq!(
        repl.session().content(),
        &Slot::Ready(ContentView::Text(MISSING_KEY_MESSAGE.to_string()))
    );
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_bad_lines_do_not_stop_the_session() {
    let model = Arc::new(ScriptedModel::new());
    let mut repl = Repl::new(Arc::new(service_with(model)));

    assert_eq!(repl.handle_line("hack the planet"), Flow::Continue);
    assert_eq!(repl.handle_line("answer 1 A"), Flow::Continue);
    assert_eq!(repl.handle_line("open 42"), Flow::Continue);
    assert_eq!(repl.handle_line("quit"), Flow::Exit);
    assert!(repl.session().module().is_none());
}

#[tokio::test]
async fn test_run_can_resume_after_end_of_input() {
    let model = Arc::new(ScriptedModel::new());
    let mut repl = Repl::new(Arc::new(service_with(Arc::clone(&model))));

    repl.run(&b"open 2\n"[..]).await.unwrap();
    repl.run(&b"flashcards\n"[..]).await.unwrap();

    match repl.session().content().ready() {
        Some(ContentView::Flashcards(deck)) => assert_eq!(deck.len(), 3),
        other => panic!("expected flashcards, got {:?}", other),
    }
    assert_eq!(model.calls(), 2);
}
