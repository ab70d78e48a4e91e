//! Study Session
//!
//! Presentation state for one learner: which module and subtopic are open,
//! the learning mode, and the two independent response channels (topic
//! content and free-form search). Requests are not executed here; the
//! session hands out tickets and accepts results only for the latest ticket
//! on each channel.

pub mod deck;
pub mod fence;
pub mod quiz;

pub use deck::FlashcardDeck;
pub use fence::RequestFence;
pub use quiz::{AnswerOutcome, QuizAttempt};

use tracing::debug;

use crate::content::{GeneratedContent, LearningMode};
use crate::syllabus::{self, Module, Subtopic};

/// State of one response channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Slot<T> {
    #[default]
    Idle,
    Pending {
        token: u64,
    },
    Ready(T),
}

impl<T> Slot<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending { .. })
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Slot::Ready(value) => Some(value),
            Slot::Idle | Slot::Pending { .. } => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Ready(value) => Some(value),
            Slot::Idle | Slot::Pending { .. } => None,
        }
    }
}

/// Everything needed to run one content request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTicket {
    pub token: u64,
    pub mode: LearningMode,
    pub module_title: &'static str,
    pub subtopic_title: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub token: u64,
    pub query: String,
}

/// Interactive form of a generated result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    Text(String),
    Quiz(QuizAttempt),
    Flashcards(FlashcardDeck),
}

impl From<GeneratedContent> for ContentView {
    fn from(content: GeneratedContent) -> Self {
        match content {
            GeneratedContent::Text(text) => ContentView::Text(text),
            GeneratedContent::Quiz(questions) => ContentView::Quiz(QuizAttempt::new(questions)),
            GeneratedContent::Flashcards(cards) => {
                ContentView::Flashcards(FlashcardDeck::new(cards))
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct StudySession {
    module: Option<&'static Module>,
    subtopic: Option<usize>,
    mode: LearningMode,
    content: Slot<ContentView>,
    search: Slot<String>,
    content_fence: RequestFence,
    search_fence: RequestFence,
}

impl StudySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module(&self) -> Option<&'static Module> {
        self.module
    }

    pub fn subtopic_index(&self) -> Option<usize> {
        self.subtopic
    }

    pub fn subtopic(&self) -> Option<&'static Subtopic> {
        self.module?.subtopic(self.subtopic?)
    }

    pub fn mode(&self) -> LearningMode {
        self.mode
    }

    pub fn content(&self) -> &Slot<ContentView> {
        &self.content
    }

    pub fn search(&self) -> &Slot<String> {
        &self.search
    }

    pub fn quiz_mut(&mut self) -> Option<&mut QuizAttempt> {
        match self.content.ready_mut()? {
            ContentView::Quiz(attempt) => Some(attempt),
            ContentView::Text(_) | ContentView::Flashcards(_) => None,
        }
    }

    pub fn deck_mut(&mut self) -> Option<&mut FlashcardDeck> {
        match self.content.ready_mut()? {
            ContentView::Flashcards(deck) => Some(deck),
            ContentView::Text(_) | ContentView::Quiz(_) => None,
        }
    }

    /// Open a module on its first subtopic in lesson mode. Unknown ids
    /// leave the session untouched.
    pub fn open_module(&mut self, id: u32) -> Option<ContentTicket> {
        let module = syllabus::find_module(id)?;
        self.module = Some(module);
        self.subtopic = if module.subtopics.is_empty() {
            None
        } else {
            Some(0)
        };
        self.mode = LearningMode::Lesson;
        self.content = Slot::Idle;
        self.content_fence.invalidate();
        self.request_content()
    }

    pub fn select_subtopic(&mut self, index: usize) -> Option<ContentTicket> {
        let module = self.module?;
        module.subtopic(index)?;
        self.subtopic = Some(index);
        self.request_content()
    }

    /// Switch mode. Only a real change triggers a request.
    pub fn set_mode(&mut self, mode: LearningMode) -> Option<ContentTicket> {
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        self.request_content()
    }

    /// Regenerate the current subtopic in the current mode.
    pub fn retry(&mut self) -> Option<ContentTicket> {
        self.request_content()
    }

    /// Return to the module overview, dropping any pending content.
    pub fn close_module(&mut self) {
        self.module = None;
        self.subtopic = None;
        self.content = Slot::Idle;
        self.content_fence.invalidate();
    }

    fn request_content(&mut self) -> Option<ContentTicket> {
        let module = self.module?;
        let subtopic = module.subtopic(self.subtopic?)?;
        let token = self.content_fence.issue();
        self.content = Slot::Pending { token };
        Some(ContentTicket {
            token,
            mode: self.mode,
            module_title: module.title,
            subtopic_title: subtopic.title,
        })
    }

    /// Store a result if its ticket is still the latest. Returns false for
    /// stale results, which are dropped.
    pub fn accept_content(&mut self, ticket: &ContentTicket, content: GeneratedContent) -> bool {
        if !self.content_fence.is_current(ticket.token) {
            debug!(token = ticket.token, "Discarding stale content response");
            return false;
        }
        self.content = Slot::Ready(content.into());
        true
    }

    /// Start a search. Blank queries are ignored.
    pub fn submit_query(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let token = self.search_fence.issue();
        self.search = Slot::Pending { token };
        Some(SearchTicket {
            token,
            query: query.to_string(),
        })
    }

    pub fn accept_answer(&mut self, ticket: &SearchTicket, answer: String) -> bool {
        if !self.search_fence.is_current(ticket.token) {
            debug!(token = ticket.token, "Discarding stale search response");
            return false;
        }
        self.search = Slot::Ready(answer);
        true
    }

    pub fn clear_search(&mut self) {
        self.search = Slot::Idle;
        self.search_fence.invalidate();
    }
}
