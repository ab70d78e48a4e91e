//! Unit tests for terminal views
//!
//! Color is disabled so assertions see plain text.

use ceh_coach::content::{Flashcard, GeneratedContent, LearningMode, QuizQuestion};
use ceh_coach::render;
use ceh_coach::study::{FlashcardDeck, QuizAttempt, StudySession};
use ceh_coach::syllabus;

fn plain() {
    colored::control::set_override(false);
}

fn sample_quiz() -> QuizAttempt {
    QuizAttempt::new(vec![QuizQuestion {
        question: "Which Nmap flag enables version detection?".into(),
        options: vec!["-sV".into(), "-sS".into(), "-O".into(), "-Pn".into()],
        correct_answer_index: 0,
        explanation: "-sV probes service versions.".into(),
    }])
}

#[test]
fn test_dashboard_lists_every_module() {
    plain();
    let list = render::module_list();
    for module in syllabus::modules() {
        assert!(list.contains(&format!("MODULE {:02}", module.id)));
        assert!(list.contains(module.title));
    }
}

#[test]
fn test_quiz_progress_then_score() {
    plain();
    let mut quiz = sample_quiz();
    assert!(render::quiz_view(&quiz).contains("0 / 1 Answered"));

    quiz.select(0, 1);
    quiz.submit();
    let view = render::quiz_view(&quiz);
    assert!(view.contains("Score: 0 / 1"));
    assert!(view.contains("Incorrect"));
    assert!(view.contains("-sV probes service versions."));
}

#[test]
fn test_flashcard_sides() {
    plain();
    let mut deck = FlashcardDeck::new(vec![Flashcard {
        term: "Banner Grabbing".into(),
        definition: "Reading service banners to fingerprint software".into(),
    }]);
    let front = render::deck_view(&deck);
    assert!(front.contains("Card 1 of 1"));
    assert!(front.contains("Banner Grabbing"));

    deck.flip();
    assert!(render::deck_view(&deck).contains("fingerprint software"));
}

#[test]
fn test_empty_collections_have_messages() {
    plain();
    assert_eq!(
        render::quiz_view(&QuizAttempt::new(Vec::new())),
        render::EMPTY_QUIZ_MESSAGE
    );
    assert_eq!(
        render::deck_view(&FlashcardDeck::new(Vec::new())),
        render::EMPTY_DECK_MESSAGE
    );
}

#[test]
fn test_content_slot_follows_session() {
    plain();
    let mut session = StudySession::new();
    assert_eq!(render::content_slot(&session), render::NO_TOPIC_MESSAGE);

    let ticket = session.open_module(4).unwrap();
    assert!(render::content_slot(&session).contains("Analyzing lesson parameters..."));

    session.accept_content(&ticket, GeneratedContent::Text("**Scanning** basics".into()));
    assert_eq!(render::content_slot(&session), "Scanning basics");
    assert!(render::content_header(&session).contains("[Lesson]"));
}

#[test]
fn test_loading_message_names_mode() {
    assert_eq!(
        render::loading_message(LearningMode::Flashcards),
        "Analyzing flashcards parameters..."
    );
}
