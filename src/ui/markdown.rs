//! Terminal Markdown Renderer
//!
//! Renders generated lessons and answers for a plain terminal: bold and
//! italic spans, headings, bullet and numbered lists, inline code, and
//! indented code blocks. Output is a `String` of styled lines.

use colored::Colorize;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::style::{rule, CoachStyle, Glyphs};

/// Render markdown to styled terminal text.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut state = RenderState::default();
    for event in Parser::new_ext(markdown, options) {
        state.process_event(event);
    }
    state.finish()
}

#[derive(Default)]
struct RenderState {
    lines: Vec<String>,
    current: String,
    /// One entry per open list: `Some(next number)` for ordered lists.
    lists: Vec<Option<u64>>,
    strong: bool,
    emphasis: bool,
    heading: bool,
    code_block: Option<String>,
}

impl RenderState {
    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag_end) => self.end_tag(tag_end),
            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => {
                let code = format!("`{}`", code);
                self.current.push_str(&code.term().to_string());
            }
            Event::SoftBreak | Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                self.lines.push(rule(40).muted().to_string());
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_line();
                self.heading = true;
                if level == HeadingLevel::H1 || level == HeadingLevel::H2 {
                    self.blank_line();
                }
            }
            Tag::CodeBlock(kind) => {
                self.flush_line();
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.lines.push(format!("  {}", lang.muted()));
                    }
                }
                self.code_block = Some(String::new());
            }
            Tag::List(start) => {
                self.flush_line();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush_line();
                let depth = self.lists.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}.", n);
                        *n += 1;
                        marker
                    }
                    _ => Glyphs::bullet().to_string(),
                };
                self.current
                    .push_str(&format!("{}{} ", indent, marker.accent()));
            }
            Tag::Strong => self.strong = true,
            Tag::Emphasis => self.emphasis = true,
            Tag::BlockQuote(_) => {
                self.flush_line();
                self.current
                    .push_str(&format!("{} ", Glyphs::vert().muted()));
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag_end: TagEnd) {
        match tag_end {
            TagEnd::Heading(_) => {
                self.heading = false;
                self.flush_line();
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code_block.take() {
                    for line in code.lines() {
                        self.lines.push(format!("    {}", line.muted()));
                    }
                }
                self.blank_line();
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::Strong => self.strong = false,
            TagEnd::Emphasis => self.emphasis = false,
            TagEnd::Paragraph => {
                self.flush_line();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::BlockQuote(_) => self.flush_line(),
            _ => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if let Some(code) = self.code_block.as_mut() {
            code.push_str(text);
            return;
        }

        let styled = if self.heading {
            text.heading().to_string()
        } else if self.strong {
            text.bold().to_string()
        } else if self.emphasis {
            text.italic().to_string()
        } else {
            text.to_string()
        };
        self.current.push_str(&styled);
    }

    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn finish(mut self) -> String {
        self.flush_line();
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }
}
