//! CEH Coach command line
//!
//! One-shot subcommands for browsing the syllabus and generating material,
//! plus the interactive study REPL (the default).

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::coach::{is_failure_message, ContentService, PARSE_ERROR_MESSAGE};
use crate::config::{Config, API_KEY_ENV_VARS};
use crate::content::{GeneratedContent, LearningMode};
use crate::errors::{ApiError, CoachError};
use crate::output;
use crate::render;
use crate::repl::Repl;
use crate::syllabus::{self, Module, Subtopic};
use crate::telemetry::{init_tracing, init_tracing_verbose};
use crate::ui::spinner::TerminalSpinner;
use crate::ui::style::{set_ascii_mode, CoachStyle};

#[derive(Parser, Debug)]
#[command(name = "ceh-coach")]
#[command(about = "Certified Ethical Hacker training coach for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Compact output mode (no spinner, less chrome)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose mode (model details and info-level logs)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List the course modules
    #[command(alias = "ls")]
    Modules,

    /// Show one module's subtopics and outcomes
    Show {
        /// Module number (1-12)
        module: u32,
    },

    /// Generate learning material for a subtopic
    #[command(alias = "l")]
    Learn {
        /// Module number (1-12)
        module: u32,

        /// Subtopic number (1-based) or title; defaults to the first
        subtopic: Option<String>,

        /// What to generate
        #[arg(short, long, value_enum, default_value_t = LearningMode::Lesson)]
        mode: LearningMode,
    },

    /// Ask the coach a free-form question
    #[command(alias = "a")]
    Ask {
        /// The question
        query: String,
    },

    /// Interactive study session (default)
    Study,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        init_tracing_verbose();
    } else {
        init_tracing();
    }

    if cli.no_color || std::env::var("NO_COLOR").is_ok() {
        output::disable_color();
    }
    if matches!(std::env::var("TERM").as_deref(), Ok("dumb")) {
        set_ascii_mode(true);
    }

    let config_path = cli.config.as_deref().map(expand_home);
    let config = Config::load(config_path.as_deref())
        .map_err(|e| CoachError::Config(format!("{:#}", e)))?;

    if config.ui.no_color {
        output::disable_color();
    }
    output::init(cli.compact || config.ui.compact_mode, cli.verbose);

    match cli.command.unwrap_or(Commands::Study) {
        Commands::Modules => {
            println!("{}", render::module_list());
            Ok(())
        }
        Commands::Show { module } => {
            let module = resolve_module(module)?;
            println!("{}", render::module_detail(module));
            Ok(())
        }
        Commands::Learn {
            module,
            subtopic,
            mode,
        } => {
            let module = resolve_module(module)?;
            let subtopic = resolve_subtopic(module, subtopic.as_deref())?;
            let service = ContentService::from_config(&config)?;
            learn(&service, module, subtopic, mode).await
        }
        Commands::Ask { query } => {
            if query.trim().is_empty() {
                return Err(CoachError::Usage("Please enter a question.".into()).into());
            }
            let service = ContentService::from_config(&config)?;
            ask(&service, &query).await
        }
        Commands::Study => {
            let service = Arc::new(ContentService::from_config(&config)?);
            output::detail("Model", service.model());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            Repl::new(service).run(stdin).await
        }
    }
}

fn expand_home(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest).to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string()),
        None => path.to_string(),
    }
}

pub fn resolve_module(id: u32) -> Result<&'static Module, CoachError> {
    syllabus::find_module(id).ok_or_else(|| {
        CoachError::Syllabus(format!(
            "module {} (modules are numbered 1 to {})",
            id,
            syllabus::modules().len()
        ))
    })
}

/// Subtopic by 1-based number or by title; the first one when omitted.
pub fn resolve_subtopic(
    module: &'static Module,
    reference: Option<&str>,
) -> Result<&'static Subtopic, CoachError> {
    let found = match reference.map(str::trim) {
        None | Some("") => module.subtopic(0),
        Some(r) => match r.parse::<usize>() {
            Ok(n) => n.checked_sub(1).and_then(|i| module.subtopic(i)),
            Err(_) => module.find_subtopic(r),
        },
    };
    found.ok_or_else(|| {
        CoachError::Syllabus(format!(
            "subtopic '{}' in module {}",
            reference.unwrap_or_default(),
            module.id
        ))
    })
}

fn missing_key_error() -> CoachError {
    CoachError::Config(format!(
        "no API key configured. Set one of {} or `api_key` in ceh-coach.toml",
        API_KEY_ENV_VARS.join(", ")
    ))
}

async fn learn(
    service: &ContentService,
    module: &Module,
    subtopic: &Subtopic,
    mode: LearningMode,
) -> Result<()> {
    println!(
        "{} {}\n{} {}",
        format!("Module {}:", module.id).muted(),
        module.title.muted(),
        subtopic.title.heading(),
        format!("[{}]", mode.label()).accent()
    );
    output::detail("Model", service.model());

    let spinner = TerminalSpinner::start(&render::loading_message(mode));
    let content = service.generate(mode, module.title, subtopic.title).await;

    let failure = match &content {
        GeneratedContent::Text(text) if is_failure_message(text) => {
            spinner.stop_error(&format!("{} failed", mode.label()));
            output::failure(text);
            Some(text.as_str())
        }
        GeneratedContent::Text(text) => {
            spinner.stop_success(&format!("{} ready", mode.label()));
            println!("{}", render::text_view(text));
            None
        }
        GeneratedContent::Quiz(questions) => {
            spinner.stop_success(&format!("{} questions", questions.len()));
            println!("{}", render::quiz_answer_key(questions));
            None
        }
        GeneratedContent::Flashcards(cards) => {
            spinner.stop_success(&format!("{} flashcards", cards.len()));
            println!("{}", render::flashcard_list(cards));
            None
        }
    };

    finish(service, failure)
}

async fn ask(service: &ContentService, query: &str) -> Result<()> {
    let spinner = TerminalSpinner::start(render::SEARCH_LOADING_MESSAGE);
    let answer = service.ask(query).await;

    let failed = is_failure_message(&answer);
    if failed {
        spinner.stop_error("Search failed");
        output::failure(&answer);
    } else {
        spinner.stop();
        println!("{}", render::answer_view(&answer));
    }

    finish(service, failed.then_some(answer.as_str()))
}

/// Exit status for a one-shot command once its output is shown: a missing
/// credential is a config error, any other failure message an API error.
fn finish(service: &ContentService, failure: Option<&str>) -> Result<()> {
    if !service.has_credential() {
        return Err(missing_key_error().into());
    }
    match failure {
        Some(message) => Err(CoachError::Api(failure_cause(message)).into()),
        None => Ok(()),
    }
}

fn failure_cause(message: &str) -> ApiError {
    if message == PARSE_ERROR_MESSAGE {
        ApiError::Parse(message.to_string())
    } else {
        ApiError::Network(message.to_string())
    }
}
