//! Terminal views for the syllabus, generated content, and session state.
//!
//! Every view returns a `String` so the REPL and one-shot commands print the
//! same output and tests can assert on it with colors disabled.

use std::fmt::Write as _;

use colored::Colorize;

use crate::content::{Flashcard, LearningMode, QuizQuestion};
use crate::study::{AnswerOutcome, ContentView, FlashcardDeck, QuizAttempt, Slot, StudySession};
use crate::syllabus::{self, Module};
use crate::ui::markdown::render_markdown;
use crate::ui::style::{rule, CoachStyle, Glyphs};

pub const EMPTY_QUIZ_MESSAGE: &str = "No questions generated. Try again.";
pub const EMPTY_DECK_MESSAGE: &str = "No flashcards available.";
pub const NO_TOPIC_MESSAGE: &str = "Select a topic to begin.";

/// Loading line for a content request in `mode`.
pub fn loading_message(mode: LearningMode) -> String {
    format!("Analyzing {} parameters...", mode)
}

pub const SEARCH_LOADING_MESSAGE: &str = "Searching syllabus knowledge base...";

/// Option letter for a zero-based index.
pub fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Dashboard card: id, duration, title, and a preview of two subtopics.
pub fn module_card(module: &Module) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {} {}",
        format!("MODULE {:02}", module.id).heading(),
        Glyphs::clock(),
        module.duration.muted()
    );
    let _ = writeln!(out, "  {}", module.title.bold());
    for sub in module.subtopics.iter().take(2) {
        let _ = writeln!(out, "    {} {}", Glyphs::shield(), sub.title);
    }
    if module.subtopics.len() > 2 {
        let more = format!("+ {} more topics...", module.subtopics.len() - 2);
        let _ = writeln!(out, "    {}", more.as_str().muted().italic());
    }
    out
}

pub fn module_list() -> String {
    let cards: Vec<String> = syllabus::modules().iter().map(module_card).collect();
    cards.join("\n")
}

/// Full module outline: subtopics with time and details, then outcomes.
pub fn module_detail(module: &Module) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        format!("Module {}:", module.id).heading(),
        module.title.heading()
    );
    let _ = writeln!(out, "{} {}", Glyphs::clock(), module.duration.muted());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Subtopics".accent());
    for (i, sub) in module.subtopics.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} {}",
            i + 1,
            sub.title.bold(),
            format!("({})", sub.time).muted()
        );
        for detail in sub.details.unwrap_or(&[]) {
            let _ = writeln!(out, "       {} {}", Glyphs::bullet(), detail);
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Outcomes".accent());
    for outcome in module.outcomes {
        let _ = writeln!(out, "  {} {}", Glyphs::check(), outcome);
    }
    out
}

/// Module, subtopic, and mode line above the content area.
pub fn content_header(session: &StudySession) -> String {
    match (session.module(), session.subtopic()) {
        (Some(module), Some(sub)) => format!(
            "{} {} {} {}\n{}",
            format!("Module {}", module.id).muted(),
            Glyphs::arrow(),
            sub.title.heading(),
            format!("[{}]", session.mode().label()).accent(),
            rule(50).muted()
        ),
        _ => NO_TOPIC_MESSAGE.muted().to_string(),
    }
}

pub fn text_view(text: &str) -> String {
    render_markdown(text)
}

pub fn quiz_view(attempt: &QuizAttempt) -> String {
    if attempt.is_empty() {
        return EMPTY_QUIZ_MESSAGE.muted().to_string();
    }

    let mut out = String::new();
    let status = if attempt.is_submitted() {
        format!("Score: {} / {}", attempt.score(), attempt.len())
            .correct()
            .bold()
            .to_string()
    } else {
        format!("{} / {} Answered", attempt.answered(), attempt.len())
            .muted()
            .to_string()
    };
    let _ = writeln!(out, "{}  {}", "Knowledge Check".heading(), status);

    for (q_idx, q) in attempt.questions().iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {}", q_idx + 1, q.question.as_str().bold());
        let selected = attempt.selection(q_idx);
        for (o_idx, option) in q.options.iter().enumerate() {
            let line = format!("{}. {}", option_letter(o_idx), option);
            let rendered = if attempt.is_submitted() {
                if o_idx == q.correct_answer_index {
                    format!("{} {}", Glyphs::check(), line).correct().to_string()
                } else if selected == Some(o_idx) {
                    format!("{} {}", Glyphs::cross(), line).incorrect().to_string()
                } else {
                    format!("  {}", line).muted().to_string()
                }
            } else if selected == Some(o_idx) {
                format!("{} {}", Glyphs::selected(), line).accent().to_string()
            } else {
                format!("{} {}", Glyphs::unselected(), line)
            };
            let _ = writeln!(out, "   {}", rendered);
        }

        if attempt.is_submitted() {
            let verdict = match attempt.outcome(q_idx) {
                Some(AnswerOutcome::Correct) => "Correct!".correct(),
                _ => "Incorrect".incorrect(),
            };
            let _ = writeln!(out, "   {} {}", verdict, q.explanation.as_str().muted());
        }
    }

    let _ = writeln!(out);
    let footer = if attempt.is_submitted() {
        "Type `retry` to try another set."
    } else if attempt.all_answered() {
        "All answered. Type `submit` to submit the exam."
    } else {
        "Answer with `answer <question> <A-D>`."
    };
    let _ = write!(out, "{}", footer.muted());
    out
}

/// Quiz printed with answers and explanations revealed.
pub fn quiz_answer_key(questions: &[QuizQuestion]) -> String {
    if questions.is_empty() {
        return EMPTY_QUIZ_MESSAGE.muted().to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Knowledge Check".heading());
    for (q_idx, q) in questions.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {}", q_idx + 1, q.question.as_str().bold());
        for (o_idx, option) in q.options.iter().enumerate() {
            let line = format!("{}. {}", option_letter(o_idx), option);
            if o_idx == q.correct_answer_index {
                let _ = writeln!(out, "   {}", format!("{} {}", Glyphs::check(), line).correct());
            } else {
                let _ = writeln!(out, "     {}", line);
            }
        }
        let _ = writeln!(out, "   {}", q.explanation.as_str().muted());
    }
    out
}

pub fn deck_view(deck: &FlashcardDeck) -> String {
    let Some(card) = deck.current() else {
        return EMPTY_DECK_MESSAGE.muted().to_string();
    };
    let (side, body) = if deck.is_flipped() {
        ("Definition", card.definition.as_str().normal())
    } else {
        ("Term", card.term.as_str().term())
    };
    format!(
        "{}\n\n  {}\n  {}\n\n{}",
        format!("Card {} of {}", deck.position() + 1, deck.len()).muted(),
        side.accent(),
        body,
        "`flip` to turn, `next` / `prev` to move.".muted()
    )
}

/// All cards, term and definition, for one-shot output.
pub fn flashcard_list(cards: &[Flashcard]) -> String {
    if cards.is_empty() {
        return EMPTY_DECK_MESSAGE.muted().to_string();
    }
    let mut out = String::new();
    for (i, card) in cards.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} {}",
            format!("{:>2}.", i + 1).muted(),
            card.term.as_str().term()
        );
        let _ = writeln!(out, "    {}", card.definition);
    }
    out
}

pub fn content_view(view: &ContentView) -> String {
    match view {
        ContentView::Text(text) => text_view(text),
        ContentView::Quiz(attempt) => quiz_view(attempt),
        ContentView::Flashcards(deck) => deck_view(deck),
    }
}

/// The content area for whatever state the content channel is in.
pub fn content_slot(session: &StudySession) -> String {
    match session.content() {
        Slot::Idle => NO_TOPIC_MESSAGE.muted().to_string(),
        Slot::Pending { .. } => format!("> {}", loading_message(session.mode()))
            .correct()
            .to_string(),
        Slot::Ready(view) => content_view(view),
    }
}

pub fn answer_view(answer: &str) -> String {
    format!(
        "{}\n{}",
        "AI COACH RESPONSE".heading(),
        render_markdown(answer)
    )
}
