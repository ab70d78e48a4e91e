//! Unit tests for study session state
//!
//! Tests cover:
//! - Navigation (open, subtopic, mode, back)
//! - Stale response fencing for content and search
//! - Quiz answering and scoring through the session
//! - Flashcard deck navigation through the session

use ceh_coach::content::{Flashcard, GeneratedContent, LearningMode, QuizQuestion};
use ceh_coach::study::{AnswerOutcome, ContentView, Slot, StudySession};

fn question(correct: usize) -> QuizQuestion {
    QuizQuestion {
        question: "Which phase comes first?".into(),
        options: vec![
            "Reconnaissance".into(),
            "Scanning".into(),
            "Gaining Access".into(),
            "Clearing Tracks".into(),
        ],
        correct_answer_index: correct,
        explanation: "Reconnaissance precedes scanning.".into(),
    }
}

fn card(term: &str) -> Flashcard {
    Flashcard {
        term: term.into(),
        definition: format!("{} definition", term),
    }
}

mod navigation_tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = StudySession::new();
        assert!(session.module().is_none());
        assert_eq!(session.mode(), LearningMode::Lesson);
        assert_eq!(session.content(), &Slot::Idle);
        assert_eq!(session.search(), &Slot::Idle);
    }

    #[test]
    fn test_unknown_module_leaves_session_untouched() {
        let mut session = StudySession::new();
        assert!(session.open_module(0).is_none());
        assert!(session.open_module(99).is_none());
        assert!(session.module().is_none());
    }

    #[test]
    fn test_open_then_select_subtopic() {
        let mut session = StudySession::new();
        session.open_module(4).unwrap();
        let ticket = session.select_subtopic(2).unwrap();

        assert_eq!(ticket.subtopic_title, "Nmap Mastery");
        assert_eq!(session.subtopic().map(|s| s.title), Some("Nmap Mastery"));
        assert!(session.content().is_pending());
    }

    #[test]
    fn test_select_subtopic_out_of_range() {
        let mut session = StudySession::new();
        session.open_module(4).unwrap();
        assert!(session.select_subtopic(40).is_none());
        assert_eq!(session.subtopic_index(), Some(0));
    }

    #[test]
    fn test_same_mode_issues_no_request() {
        let mut session = StudySession::new();
        session.open_module(1).unwrap();
        assert!(session.set_mode(LearningMode::Lesson).is_none());
        assert!(session.set_mode(LearningMode::Summary).is_some());
    }

    #[test]
    fn test_mode_without_module_is_remembered() {
        let mut session = StudySession::new();
        assert!(session.set_mode(LearningMode::Quiz).is_none());
        assert_eq!(session.mode(), LearningMode::Quiz);
        assert!(session.retry().is_none());
    }

    #[test]
    fn test_close_module_drops_pending_content() {
        let mut session = StudySession::new();
        let ticket = session.open_module(2).unwrap();
        session.close_module();

        assert!(!session.accept_content(&ticket, GeneratedContent::Text("late".into())));
        assert_eq!(session.content(), &Slot::Idle);
        assert!(session.module().is_none());
    }
}

mod fencing_tests {
    use super::*;

    #[test]
    fn test_latest_request_wins() {
        let mut session = StudySession::new();
        let first = session.open_module(1).unwrap();
        let second = session.set_mode(LearningMode::Flashcards).unwrap();

        assert!(session.accept_content(
            &second,
            GeneratedContent::Flashcards(vec![card("CIA")])
        ));
        assert!(!session.accept_content(&first, GeneratedContent::Text("old".into())));
        assert!(matches!(
            session.content().ready(),
            Some(ContentView::Flashcards(_))
        ));
    }

    #[test]
    fn test_retry_supersedes_pending() {
        let mut session = StudySession::new();
        let first = session.open_module(1).unwrap();
        let retry = session.retry().unwrap();
        assert_ne!(first.token, retry.token);
        assert!(!session.accept_content(&first, GeneratedContent::Text("old".into())));
        assert!(session.accept_content(&retry, GeneratedContent::Text("new".into())));
    }

    #[test]
    fn test_search_is_fenced_independently() {
        let mut session = StudySession::new();
        let content = session.open_module(1).unwrap();
        let old_query = session.submit_query("What is OSINT?").unwrap();
        let new_query = session.submit_query("What is WHOIS?").unwrap();

        assert!(!session.accept_answer(&old_query, "stale".into()));
        assert!(session.accept_answer(&new_query, "fresh".into()));
        assert!(session.accept_content(&content, GeneratedContent::Text("lesson".into())));
        assert_eq!(session.search(), &Slot::Ready("fresh".to_string()));
    }

    #[test]
    fn test_clear_search_drops_in_flight_answer() {
        let mut session = StudySession::new();
        let ticket = session.submit_query("SQL injection").unwrap();
        session.clear_search();
        assert!(!session.accept_answer(&ticket, "late".into()));
        assert_eq!(session.search(), &Slot::Idle);
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let mut session = StudySession::new();
        assert!(session.submit_query("   ").is_none());
        assert_eq!(session.search(), &Slot::Idle);
    }
}

mod quiz_flow_tests {
    use super::*;

    #[test]
    fn test_answer_and_submit_through_session() {
        let mut session = StudySession::new();
        session.open_module(1).unwrap();
        let ticket = session.set_mode(LearningMode::Quiz).unwrap();
        session.accept_content(&ticket, GeneratedContent::Quiz(vec![question(0), question(1)]));

        let quiz = session.quiz_mut().unwrap();
        assert!(!quiz.submit());
        assert!(quiz.select(0, 0));
        assert!(quiz.select(1, 3));
        assert!(quiz.submit());

        assert_eq!(quiz.score(), 1);
        assert_eq!(quiz.outcome(0), Some(AnswerOutcome::Correct));
        assert_eq!(
            quiz.outcome(1),
            Some(AnswerOutcome::Incorrect { selected: 3 })
        );
        assert!(!quiz.select(0, 1));
    }

    #[test]
    fn test_new_quiz_resets_attempt() {
        let mut session = StudySession::new();
        session.open_module(1).unwrap();
        let ticket = session.set_mode(LearningMode::Quiz).unwrap();
        session.accept_content(&ticket, GeneratedContent::Quiz(vec![question(0)]));
        session.quiz_mut().unwrap().select(0, 0);

        let again = session.retry().unwrap();
        session.accept_content(&again, GeneratedContent::Quiz(vec![question(0)]));
        let quiz = session.quiz_mut().unwrap();
        assert_eq!(quiz.answered(), 0);
        assert!(!quiz.is_submitted());
    }

    #[test]
    fn test_empty_quiz_cannot_submit() {
        let mut session = StudySession::new();
        session.open_module(1).unwrap();
        let ticket = session.set_mode(LearningMode::Quiz).unwrap();
        session.accept_content(&ticket, GeneratedContent::Quiz(Vec::new()));
        assert!(!session.quiz_mut().unwrap().submit());
    }

    #[test]
    fn test_quiz_accessor_only_for_quiz_content() {
        let mut session = StudySession::new();
        let ticket = session.open_module(1).unwrap();
        session.accept_content(&ticket, GeneratedContent::Text("lesson".into()));
        assert!(session.quiz_mut().is_none());
        assert!(session.deck_mut().is_none());
    }
}

mod deck_flow_tests {
    use super::*;

    #[test]
    fn test_deck_wraps_and_resets_flip() {
        let mut session = StudySession::new();
        session.open_module(3).unwrap();
        let ticket = session.set_mode(LearningMode::Flashcards).unwrap();
        session.accept_content(
            &ticket,
            GeneratedContent::Flashcards(vec![card("OSINT"), card("WHOIS")]),
        );

        let deck = session.deck_mut().unwrap();
        deck.flip();
        assert!(deck.is_flipped());
        deck.next();
        assert!(!deck.is_flipped());
        assert_eq!(deck.current().map(|c| c.term.as_str()), Some("WHOIS"));
        deck.next();
        assert_eq!(deck.position(), 0);
        deck.prev();
        assert_eq!(deck.position(), 1);
    }
}
