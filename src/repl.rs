//! Interactive Study REPL
//!
//! Reads commands line by line and runs generation requests as background
//! tasks, so a new selection never waits on an old one. Completed requests
//! come back over a channel and are applied through the session, which drops
//! anything superseded in the meantime.

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::coach::ContentService;
use crate::content::{GeneratedContent, LearningMode};
use crate::output;
use crate::render;
use crate::study::{ContentTicket, SearchTicket, Slot, StudySession};
use crate::ui::style::{CoachStyle, Glyphs};

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Modules,
    /// 1-based module id
    Open(u32),
    /// 0-based subtopic index
    Topic(usize),
    Mode(LearningMode),
    Retry,
    Back,
    Ask(String),
    Clear,
    /// 0-based question and option
    Answer { question: usize, option: usize },
    Submit,
    Flip,
    Next,
    Prev,
    Show,
    Help,
    Exit,
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type `help` for commands.")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

fn parse_position(arg: Option<&str>, usage: &'static str) -> Result<usize, CommandError> {
    arg.and_then(|a| a.parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .map(|n| n - 1)
        .ok_or(CommandError::Usage(usage))
}

/// Option by letter (A-D) or 1-based number.
fn parse_option(arg: Option<&str>) -> Option<usize> {
    let arg = arg?.trim();
    if let Ok(n) = arg.parse::<usize>() {
        return n.checked_sub(1);
    }
    let mut chars = arg.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !letter.is_ascii_uppercase() {
        return None;
    }
    Some((letter as u8 - b'A') as usize)
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    let command = match word.to_ascii_lowercase().as_str() {
        "modules" | "ls" => Command::Modules,
        "open" => {
            let id = args
                .next()
                .and_then(|a| a.parse::<u32>().ok())
                .ok_or(CommandError::Usage("open <module number>"))?;
            Command::Open(id)
        }
        "topic" => Command::Topic(parse_position(args.next(), "topic <subtopic number>")?),
        "mode" => {
            let mode = args
                .next()
                .and_then(|a| a.parse::<LearningMode>().ok())
                .ok_or(CommandError::Usage("mode <lesson|summary|quiz|flashcards>"))?;
            Command::Mode(mode)
        }
        "lesson" => Command::Mode(LearningMode::Lesson),
        "summary" => Command::Mode(LearningMode::Summary),
        "quiz" => Command::Mode(LearningMode::Quiz),
        "flashcards" | "cards" => Command::Mode(LearningMode::Flashcards),
        "retry" => Command::Retry,
        "back" => Command::Back,
        "ask" => Command::Ask(rest.to_string()),
        "clear" => Command::Clear,
        "answer" => {
            let usage = "answer <question number> <A-D>";
            let question = parse_position(args.next(), usage)?;
            let option = parse_option(args.next()).ok_or(CommandError::Usage(usage))?;
            Command::Answer { question, option }
        }
        "submit" => Command::Submit,
        "flip" => Command::Flip,
        "next" => Command::Next,
        "prev" => Command::Prev,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "exit" | "quit" => Command::Exit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

enum Completion {
    Content(ContentTicket, GeneratedContent),
    Answer(SearchTicket, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Repl {
    service: Arc<ContentService>,
    session: StudySession,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: Option<mpsc::UnboundedReceiver<Completion>>,
    in_flight: usize,
}

impl Repl {
    pub fn new(service: Arc<ContentService>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            service,
            session: StudySession::new(),
            completions_tx,
            completions_rx: Some(completions_rx),
            in_flight: 0,
        }
    }

    pub fn session(&self) -> &StudySession {
        &self.session
    }

    /// Run until `exit`, or until end of input once every outstanding
    /// request has been applied.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut completions = self
            .completions_rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("REPL is already running"))?;
        let mut lines = input.lines();
        let interactive = std::io::stdin().is_terminal();

        self.print_welcome();
        let mut exit_requested = false;
        loop {
            if crate::is_shutdown_requested() {
                exit_requested = true;
                break;
            }
            if interactive {
                print!("{} ", "ceh ❯".heading());
                std::io::stdout().flush()?;
            }

            let mut end_of_input = false;
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => exit_requested = self.handle_line(&line) == Flow::Exit,
                    None => end_of_input = true,
                },
                Some(done) = completions.recv() => self.apply(done),
            }
            if exit_requested || end_of_input {
                break;
            }
        }

        // Piped input ends before its requests do; wait for them.
        if !exit_requested {
            while self.in_flight > 0 {
                match completions.recv().await {
                    Some(done) => self.apply(done),
                    None => break,
                }
            }
        }
        self.completions_rx = Some(completions);
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> Flow {
        match parse_command(line) {
            Ok(command) => self.handle(command),
            Err(e) => {
                output::warning(&e.to_string());
                Flow::Continue
            }
        }
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Empty => {}
            Command::Modules => println!("{}", render::module_list()),
            Command::Open(id) => match self.session.open_module(id) {
                Some(ticket) => {
                    if let Some(module) = self.session.module() {
                        println!("{}", render::module_detail(module));
                    }
                    self.spawn_content(ticket);
                }
                None => output::warning(&format!(
                    "No module {}. Modules are numbered 1 to {}.",
                    id,
                    crate::syllabus::modules().len()
                )),
            },
            Command::Topic(index) => {
                if self.session.module().is_none() {
                    output::warning("Open a module first with `open <number>`.");
                } else {
                    match self.session.select_subtopic(index) {
                        Some(ticket) => self.spawn_content(ticket),
                        None => output::warning(&format!("No subtopic {}.", index + 1)),
                    }
                }
            }
            Command::Mode(mode) => {
                if mode == self.session.mode() {
                    output::notice(&format!("Already in {} mode.", mode));
                } else {
                    match self.session.set_mode(mode) {
                        Some(ticket) => self.spawn_content(ticket),
                        None => output::notice(&format!(
                            "Mode set to {}. Open a module to begin.",
                            mode
                        )),
                    }
                }
            }
            Command::Retry => match self.session.retry() {
                Some(ticket) => self.spawn_content(ticket),
                None => output::notice(render::NO_TOPIC_MESSAGE),
            },
            Command::Back => {
                self.session.close_module();
                println!("{}", render::module_list());
            }
            Command::Ask(query) => match self.session.submit_query(&query) {
                Some(ticket) => self.spawn_search(ticket),
                None => output::notice("Type a question after `ask`."),
            },
            Command::Clear => {
                self.session.clear_search();
                output::notice("Search cleared.");
            }
            Command::Answer { question, option } => self.answer(question, option),
            Command::Submit => self.submit(),
            Command::Flip | Command::Next | Command::Prev => self.navigate_deck(command),
            Command::Show => self.show(),
            Command::Help => print_help(),
            Command::Exit => return Flow::Exit,
        }
        Flow::Continue
    }

    fn answer(&mut self, question: usize, option: usize) {
        let Some(quiz) = self.session.quiz_mut() else {
            output::warning("No quiz is open. Switch to quiz mode with `quiz`.");
            return;
        };
        if quiz.is_submitted() {
            output::notice("This quiz is already submitted. Type `retry` for a new set.");
        } else if !quiz.select(question, option) {
            output::warning("No such question or option.");
        }
        println!("{}", render::quiz_view(quiz));
    }

    fn submit(&mut self) {
        let Some(quiz) = self.session.quiz_mut() else {
            output::warning("No quiz is open.");
            return;
        };
        if !quiz.is_submitted() && !quiz.submit() {
            output::warning(&format!(
                "Answer every question first ({} / {} answered).",
                quiz.answered(),
                quiz.len()
            ));
            return;
        }
        println!("{}", render::quiz_view(quiz));
    }

    fn navigate_deck(&mut self, command: Command) {
        let Some(deck) = self.session.deck_mut() else {
            output::warning("No flashcards are open. Switch with `flashcards`.");
            return;
        };
        match command {
            Command::Flip => deck.flip(),
            Command::Next => deck.next(),
            Command::Prev => deck.prev(),
            _ => {}
        }
        println!("{}", render::deck_view(deck));
    }

    fn show(&self) {
        println!("{}", render::content_header(&self.session));
        println!("{}", render::content_slot(&self.session));
        match self.session.search() {
            Slot::Idle => {}
            Slot::Pending { .. } => println!("{}", render::SEARCH_LOADING_MESSAGE.muted()),
            Slot::Ready(answer) => println!("\n{}", render::answer_view(answer)),
        }
    }

    fn spawn_content(&mut self, ticket: ContentTicket) {
        println!("{}", render::content_header(&self.session));
        println!(
            "{}",
            format!("> {}", render::loading_message(ticket.mode)).correct()
        );

        let service = Arc::clone(&self.service);
        let tx = self.completions_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let content = service
                .generate(ticket.mode, ticket.module_title, ticket.subtopic_title)
                .await;
            let _ = tx.send(Completion::Content(ticket, content));
        });
    }

    fn spawn_search(&mut self, ticket: SearchTicket) {
        println!("{}", format!("> {}", render::SEARCH_LOADING_MESSAGE).correct());

        let service = Arc::clone(&self.service);
        let tx = self.completions_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let answer = service.ask(&ticket.query).await;
            let _ = tx.send(Completion::Answer(ticket, answer));
        });
    }

    fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Content(ticket, content) => {
                if self.session.accept_content(&ticket, content) {
                    println!();
                    println!("{}", render::content_header(&self.session));
                    println!("{}", render::content_slot(&self.session));
                } else {
                    debug!(mode = %ticket.mode, "Superseded content request finished");
                }
            }
            Completion::Answer(ticket, answer) => {
                if self.session.accept_answer(&ticket, answer) {
                    if let Slot::Ready(answer) = self.session.search() {
                        println!();
                        println!("{}", render::answer_view(answer));
                    }
                } else {
                    debug!("Superseded search request finished");
                }
            }
        }
    }

    fn print_welcome(&self) {
        if output::is_compact() {
            return;
        }
        println!(
            "{} {} {}",
            Glyphs::shield(),
            "CEH Coach".heading(),
            "Certified Ethical Hacker Training".muted()
        );
        if !self.service.has_credential() {
            output::warning(crate::coach::MISSING_KEY_MESSAGE);
        }
        println!(
            "  Type {} to list modules, {} to start, {} for commands, {} to quit.",
            "modules".accent(),
            "open 1".accent(),
            "help".accent(),
            "exit".accent()
        );
    }
}

fn print_help() {
    let rows: [(&str, &str); 17] = [
        ("modules", "List the course modules"),
        ("open <N>", "Open module N on its first subtopic"),
        ("topic <N>", "Switch to subtopic N of the open module"),
        ("mode <m>", "lesson, summary, quiz, or flashcards"),
        ("lesson | summary", "Shortcut for mode"),
        ("quiz | flashcards", "Shortcut for mode"),
        ("retry", "Regenerate the current content"),
        ("back", "Close the module and return to the list"),
        ("ask <question>", "Ask the coach a free-form question"),
        ("clear", "Clear the search answer"),
        ("answer <Q> <A-D>", "Pick an option for question Q"),
        ("submit", "Submit the quiz for scoring"),
        ("flip", "Turn the current flashcard"),
        ("next | prev", "Move through the flashcards"),
        ("show", "Redraw the current content"),
        ("help", "Show this help"),
        ("exit | quit", "Leave the coach"),
    ];
    println!("{}", "Commands".heading());
    for (command, description) in rows {
        println!("  {} {}", format!("{:<20}", command).accent(), description.muted());
    }
}
