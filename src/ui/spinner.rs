//! Loading Spinner
//!
//! Shown while a one-shot generation request is in flight. Redraws the
//! current line with `\r` and ANSI line clearing from a tokio task and shows
//! elapsed time.
//!
//! Suppressed for `TERM=dumb`, unset `TERM`, non-terminal stdout, and compact
//! mode.

use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::output;
use crate::ui::style::{is_ascii_mode, CoachStyle, Glyphs};

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const ASCII_FRAMES: &[&str] = &["|", "/", "-", "\\"];

/// Whether stdout is a terminal that understands ANSI escapes.
pub fn supports_ansi() -> bool {
    if !io::stdout().is_terminal() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => !term.is_empty() && term != "dumb",
        Err(_) => false,
    }
}

fn is_active() -> bool {
    !output::is_compact() && supports_ansi()
}

/// Single-line animated spinner
pub struct TerminalSpinner {
    stop_signal: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
    start_time: Instant,
}

impl TerminalSpinner {
    pub fn start(message: &str) -> Self {
        if !is_active() {
            return Self {
                stop_signal: Arc::new(AtomicBool::new(true)),
                handle: None,
                start_time: Instant::now(),
            };
        }

        let stop_signal = Arc::new(AtomicBool::new(false));
        let stop = stop_signal.clone();
        let message = message.to_string();
        let start = Instant::now();

        let handle = tokio::spawn(async move {
            let frames = if is_ascii_mode() { ASCII_FRAMES } else { FRAMES };
            let mut tick: usize = 0;

            while !stop.load(Ordering::Relaxed) {
                let frame = frames[tick % frames.len()];
                let elapsed = start.elapsed().as_secs_f64();
                print!(
                    "\r\x1b[2K  {} {} ({:.1}s)",
                    frame.correct(),
                    message,
                    elapsed
                );
                io::stdout().flush().ok();

                tick += 1;
                tokio::time::sleep(tokio::time::Duration::from_millis(80)).await;
            }
        });

        Self {
            stop_signal,
            handle: Some(handle),
            start_time: start,
        }
    }

    pub fn stop_success(self, message: &str) {
        let icon = Glyphs::check().correct().to_string();
        self.stop_with_icon(&icon, message);
    }

    pub fn stop_error(self, message: &str) {
        let icon = Glyphs::cross().incorrect().to_string();
        self.stop_with_icon(&icon, message);
    }

    /// Stop silently, clearing the spinner line.
    pub fn stop(self) {
        drop(self);
    }

    fn stop_with_icon(mut self, icon: &str, message: &str) {
        self.halt();
        if is_active() {
            let elapsed = self.start_time.elapsed().as_secs_f64();
            println!("\r\x1b[2K  {} {} ({:.1}s)", icon, message, elapsed);
            io::stdout().flush().ok();
        }
    }

    fn halt(&mut self) {
        self.stop_signal.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            handle.abort();
            if is_active() {
                print!("\r\x1b[2K");
                io::stdout().flush().ok();
            }
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

impl Drop for TerminalSpinner {
    fn drop(&mut self) {
        self.halt();
    }
}
