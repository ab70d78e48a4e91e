//! Configuration Management
//!
//! Loads coach configuration from TOML files with environment overrides:
//! - Generation API settings (endpoint, model, credential)
//! - Request tuning (temperature, output tokens, timeout, retries)
//! - Terminal output preferences

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variables consulted for the credential, in priority order.
pub const API_KEY_ENV_VARS: [&str; 3] = ["CEH_COACH_API_KEY", "GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub retry: RetrySettings,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Transport-level retry of transient provider failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Less decoration, no spinner
    #[serde(default)]
    pub compact_mode: bool,
    /// Disable ANSI colors
    #[serde(default)]
    pub no_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout(),
            retry: RetrySettings::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_temperature() -> f32 {
    1.0
}
fn default_max_output_tokens() -> u32 {
    8192
}
fn default_request_timeout() -> u64 {
    60
}
fn default_max_retries() -> u32 {
    2
}
fn default_base_delay_ms() -> u64 {
    500
}
fn default_max_delay_ms() -> u64 {
    8000
}

impl Config {
    /// Load from an explicit path, or the first default location that
    /// exists, then apply environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let mut loaded = None;
                for p in Self::default_paths() {
                    if p.exists() {
                        loaded = Some(Self::from_file(&p.to_string_lossy())?);
                        break;
                    }
                }
                loaded.unwrap_or_else(|| {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                })
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config {}", path))
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("ceh-coach.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config/ceh-coach/config.toml"));
        }
        paths
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("CEH_COACH_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("CEH_COACH_MODEL") {
            self.model = model;
        }
        if let Ok(timeout) = std::env::var("CEH_COACH_TIMEOUT") {
            if let Ok(t) = timeout.parse::<u64>() {
                self.request_timeout_secs = t;
            }
        }
        if let Some(key) = credential_from_env() {
            self.api_key = Some(key);
        }
    }

    /// The configured credential, treating blank values as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

fn credential_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
