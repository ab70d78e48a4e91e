//! Output Control Module
//!
//! Process-wide output flags set once from CLI flags and config:
//! - `compact_mode`: less decoration, no spinner
//! - `verbose_mode`: extra detail such as model and token usage

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ui::style::Glyphs;

static COMPACT_MODE: AtomicBool = AtomicBool::new(false);
static VERBOSE_MODE: AtomicBool = AtomicBool::new(false);

/// Initialize output modes
pub fn init(compact: bool, verbose: bool) {
    COMPACT_MODE.store(compact, Ordering::SeqCst);
    VERBOSE_MODE.store(verbose, Ordering::SeqCst);
}

#[inline]
pub fn is_compact() -> bool {
    COMPACT_MODE.load(Ordering::SeqCst)
}

#[inline]
pub fn is_verbose() -> bool {
    VERBOSE_MODE.load(Ordering::SeqCst)
}

/// Turn colors off for the rest of the process.
pub fn disable_color() {
    colored::control::set_override(false);
}

/// Informational line, hidden in compact mode.
pub fn notice(msg: &str) {
    if !is_compact() {
        println!("{} {}", Glyphs::info().bright_blue(), msg.dimmed());
    }
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", Glyphs::warn().yellow(), msg.yellow());
}

pub fn failure(msg: &str) {
    eprintln!("{} {}", Glyphs::cross().red(), msg.red());
}

/// Detail shown only with `--verbose`.
pub fn detail(label: &str, value: &str) {
    if is_verbose() {
        println!("  {} {}", format!("{}:", label).dimmed(), value);
    }
}
