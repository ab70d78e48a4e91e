//! Telemetry
//!
//! Structured logging for coach operations:
//! - Generation spans with timing and outcome
//! - Log-safe rendering of user queries and provider output
//! - Configurable log levels via RUST_LOG

use regex::Regex;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Longest excerpt of provider output or user input written to a log line.
pub const MAX_LOGGED_CHARS: usize = 200;

/// Sanitize a string for safe log output by escaping control characters.
/// Prevents log injection where attackers embed newlines to forge log entries.
pub fn sanitize_for_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x1b' => out.push_str("\\e"),
            '\x00' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

static SECRET_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn secret_patterns() -> &'static Vec<Regex> {
    SECRET_PATTERNS.get_or_init(|| {
        vec![
            // Google API keys
            Regex::new(r"AIza[0-9A-Za-z_\-]{35}").expect("invalid google key regex"),
            // key=... query parameters
            Regex::new(r"(?i)([?&]key=)[^&\s]+").expect("invalid key param regex"),
            // sk-..., key-..., token-... style keys
            Regex::new(r"(?i)(sk-|key-|token-)[A-Za-z0-9_\-]{8,}").expect("invalid secret regex"),
            Regex::new(r"(?i)Bearer\s+[A-Za-z0-9_\-\.]{8,}").expect("invalid bearer regex"),
        ]
    })
}

/// Redact credential-looking substrings, replacing them with `[REDACTED]`.
pub fn redact_secrets(input: &str) -> String {
    let mut result = input.to_string();
    for pattern in secret_patterns() {
        result = pattern.replace_all(&result, "[REDACTED]").to_string();
    }
    result
}

/// Sanitized, redacted and truncated form of arbitrary text for log fields.
pub fn log_excerpt(input: &str) -> String {
    let safe = redact_secrets(&sanitize_for_log(input));
    if safe.chars().count() <= MAX_LOGGED_CHARS {
        return safe;
    }
    let mut cut: String = safe.chars().take(MAX_LOGGED_CHARS).collect();
    cut.push_str("...");
    cut
}

/// Initialize the global subscriber.
/// Only enabled when RUST_LOG is set, so study output stays clean.
pub fn init_tracing() {
    if let Ok(filter) = std::env::var("RUST_LOG") {
        init_tracing_with_filter(&filter);
    }
}

/// Initialize tracing for `--verbose`
pub fn init_tracing_verbose() {
    init_tracing_with_filter("ceh_coach=info")
}

/// Initialize with custom filter string
pub fn init_tracing_with_filter(filter: &str) {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .compact()
            .with_writer(std::io::stderr);

        let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}

/// Run one provider call inside a `coach.generate` span, recording duration
/// and outcome.
pub async fn track_generation<F, Fut, T, E>(operation: &str, f: F) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let start = Instant::now();
    let span = info_span!(
        "coach.generate",
        operation = operation,
        duration_ms = tracing::field::Empty,
        success = tracing::field::Empty,
    );

    let result = async {
        info!("Requesting generated content");
        f().await
    }
    .instrument(span.clone())
    .await;

    let duration = start.elapsed().as_millis() as u64;
    span.record("duration_ms", duration);
    span.in_scope(|| match &result {
        Ok(_) => {
            span.record("success", true);
            info!(duration_ms = duration, "Generation completed");
        }
        Err(e) => {
            let safe_err = log_excerpt(&e.to_string());
            span.record("success", false);
            error!(
                duration_ms = duration,
                error = safe_err.as_str(),
                "Generation failed"
            );
        }
    });
    result
}

#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
