//! Coach Style System
//!
//! A dark "security console" palette: signal green, amber warnings, and
//! muted slate for secondary text.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::{Colorize, CustomColor};

/// When true, all glyphs use plain ASCII instead of Unicode.
static ASCII_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_ascii_mode(enabled: bool) {
    ASCII_MODE.store(enabled, Ordering::Relaxed);
}

pub fn is_ascii_mode() -> bool {
    ASCII_MODE.load(Ordering::Relaxed)
}

pub struct Palette;

impl Palette {
    pub const SIGNAL: CustomColor = CustomColor {
        r: 16,
        g: 185,
        b: 129,
    }; // #10B981 - headings, correct answers
    pub const AMBER: CustomColor = CustomColor {
        r: 245,
        g: 158,
        b: 11,
    }; // #F59E0B - accents, selection
    pub const ALERT: CustomColor = CustomColor {
        r: 239,
        g: 68,
        b: 68,
    }; // #EF4444 - incorrect answers
    pub const SLATE: CustomColor = CustomColor {
        r: 148,
        g: 163,
        b: 184,
    }; // #94A3B8 - secondary text
    pub const CYAN: CustomColor = CustomColor {
        r: 34,
        g: 211,
        b: 238,
    }; // #22D3EE - terms, inline code
}

/// Semantic styling for coach output
pub trait CoachStyle {
    fn heading(self) -> colored::ColoredString;
    fn accent(self) -> colored::ColoredString;
    fn correct(self) -> colored::ColoredString;
    fn incorrect(self) -> colored::ColoredString;
    fn muted(self) -> colored::ColoredString;
    fn term(self) -> colored::ColoredString;
}

impl CoachStyle for &str {
    fn heading(self) -> colored::ColoredString {
        self.custom_color(Palette::SIGNAL).bold()
    }

    fn accent(self) -> colored::ColoredString {
        self.custom_color(Palette::AMBER)
    }

    fn correct(self) -> colored::ColoredString {
        self.custom_color(Palette::SIGNAL)
    }

    fn incorrect(self) -> colored::ColoredString {
        self.custom_color(Palette::ALERT)
    }

    fn muted(self) -> colored::ColoredString {
        self.custom_color(Palette::SLATE)
    }

    fn term(self) -> colored::ColoredString {
        self.custom_color(Palette::CYAN).bold()
    }
}

impl CoachStyle for String {
    fn heading(self) -> colored::ColoredString {
        self.as_str().heading()
    }

    fn accent(self) -> colored::ColoredString {
        self.as_str().accent()
    }

    fn correct(self) -> colored::ColoredString {
        self.as_str().correct()
    }

    fn incorrect(self) -> colored::ColoredString {
        self.as_str().incorrect()
    }

    fn muted(self) -> colored::ColoredString {
        self.as_str().muted()
    }

    fn term(self) -> colored::ColoredString {
        self.as_str().term()
    }
}

/// Glyphs with plain-ASCII fallbacks for minimal terminals.
pub struct Glyphs;

impl Glyphs {
    fn pick(unicode: &'static str, ascii: &'static str) -> &'static str {
        select(is_ascii_mode(), unicode, ascii)
    }

    pub fn shield() -> &'static str {
        Self::pick("🛡", "[#]")
    }
    pub fn clock() -> &'static str {
        Self::pick("⏱", "@")
    }
    pub fn check() -> &'static str {
        Self::pick("✔", "[ok]")
    }
    pub fn cross() -> &'static str {
        Self::pick("✘", "[x]")
    }
    pub fn warn() -> &'static str {
        Self::pick("⚠", "[!]")
    }
    pub fn info() -> &'static str {
        Self::pick("ℹ", "[i]")
    }
    pub fn bullet() -> &'static str {
        Self::pick("•", "*")
    }
    pub fn arrow() -> &'static str {
        Self::pick("›", ">")
    }
    pub fn selected() -> &'static str {
        Self::pick("●", "(*)")
    }
    pub fn unselected() -> &'static str {
        Self::pick("○", "( )")
    }
    pub fn horiz() -> &'static str {
        Self::pick("─", "-")
    }
    pub fn vert() -> &'static str {
        Self::pick("│", "|")
    }
}

fn select(ascii_mode: bool, unicode: &'static str, ascii: &'static str) -> &'static str {
    if ascii_mode {
        ascii
    } else {
        unicode
    }
}

/// A horizontal rule of the given width.
pub fn rule(width: usize) -> String {
    Glyphs::horiz().repeat(width)
}
