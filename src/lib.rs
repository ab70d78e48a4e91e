//! CEH Coach - Certified Ethical Hacker training in the terminal
//!
//! A study front-end over a fixed twelve-module syllabus. Learning material
//! (lessons, summaries, quizzes, flashcards) and free-form answers come from
//! a Gemini model through the [`coach::ContentService`].
//!
//! - **Syllabus**: modules, subtopics, and learning outcomes
//! - **Content**: prompt building, structured output schemas, validation
//! - **Study**: session state, quiz scoring, flashcard navigation
//! - **REPL**: interactive session with non-blocking generation
//!
//! # Quick Start
//!
//! ```ignore
//! use ceh_coach::{coach::ContentService, config::Config, content::LearningMode};
//!
//! let config = Config::load(None)?;
//! let service = ContentService::from_config(&config)?;
//! let lesson = service
//!     .generate(LearningMode::Lesson, "Footprinting and Reconnaissance", "WHOIS Lookup")
//!     .await;
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

// ─── Core ──────────────────────────────────────────────────────────
pub mod api;
pub mod coach;
pub mod config;
pub mod content;
pub mod errors;
pub mod prompts;
pub mod syllabus;
pub mod telemetry;

// ─── Study state ───────────────────────────────────────────────────
pub mod study;

// ─── UI & Input ────────────────────────────────────────────────────
pub mod cli;
pub mod output;
pub mod render;
pub mod repl;
pub mod ui;

pub use coach::ContentService;
pub use config::Config;
pub use content::{GeneratedContent, LearningMode};

static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Ask long-running loops (the study REPL) to wind down.
pub fn request_shutdown() {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

pub fn is_shutdown_requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}
