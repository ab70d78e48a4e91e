//! Quiz attempt state.

use crate::content::QuizQuestion;

/// How one question ended up after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect { selected: usize },
    Unanswered,
}

/// A learner's run through one generated quiz.
///
/// Answers can change freely until the attempt is submitted; after that the
/// attempt is frozen and only scoring is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAttempt {
    questions: Vec<QuizQuestion>,
    selected: Vec<Option<usize>>,
    submitted: bool,
}

impl QuizAttempt {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let selected = vec![None; questions.len()];
        Self {
            questions,
            selected,
            submitted: false,
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Record an answer. Ignored once submitted or when either index is out
    /// of bounds. Returns whether the selection was recorded.
    pub fn select(&mut self, question: usize, option: usize) -> bool {
        if self.submitted {
            return false;
        }
        let Some(q) = self.questions.get(question) else {
            return false;
        };
        if option >= q.options.len() {
            return false;
        }
        self.selected[question] = Some(option);
        true
    }

    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selected.get(question).copied().flatten()
    }

    pub fn answered(&self) -> usize {
        self.selected.iter().filter(|s| s.is_some()).count()
    }

    pub fn all_answered(&self) -> bool {
        !self.questions.is_empty() && self.answered() == self.questions.len()
    }

    /// Lock in the answers. Only allowed once every question is answered.
    pub fn submit(&mut self) -> bool {
        if self.submitted || !self.all_answered() {
            return false;
        }
        self.submitted = true;
        true
    }

    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.selected)
            .filter(|(q, s)| **s == Some(q.correct_answer_index))
            .count()
    }

    pub fn outcome(&self, question: usize) -> Option<AnswerOutcome> {
        let q = self.questions.get(question)?;
        Some(match self.selection(question) {
            None => AnswerOutcome::Unanswered,
            Some(i) if i == q.correct_answer_index => AnswerOutcome::Correct,
            Some(i) => AnswerOutcome::Incorrect { selected: i },
        })
    }
}
