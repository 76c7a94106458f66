// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for artifact-replay.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, ApiConfig, RetryConfig, RunConfig, GitConfig
//! Credential: resolved from env at run start, never serialized
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Default chat-completions endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default environment variable holding the API key.
pub const DEFAULT_KEY_ENV: &str = "OPENAI_API_KEY";

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. No file log when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Language model API options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Root URL of an OpenAI-compatible API (without `/chat/completions`).
    pub base_url: String,
    /// Environment variable the API key is read from.
    pub key_env: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling.
    pub top_p: f64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            key_env: DEFAULT_KEY_ENV.to_string(),
            timeout_secs: 30,
            temperature: 0.2,
            top_p: 0.1,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full chat-completions URL.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Resolve the API credential from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredential` if the variable is unset or blank.
    pub fn credential(&self) -> Result<Credential, ConfigError> {
        self.credential_from(|name| std::env::var(name).ok())
    }

    /// Resolve the API credential through a custom lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredential` if the lookup yields nothing or a blank value.
    pub fn credential_from<F>(&self, lookup: F) -> Result<Credential, ConfigError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match lookup(&self.key_env) {
            Some(value) if !value.trim().is_empty() => Ok(Credential::new(value.trim())),
            _ => Err(ConfigError::MissingCredential {
                var: self.key_env.clone(),
            }),
        }
    }
}

/// Secret API key. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw key, for the `Authorization` header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([hidden])")
    }
}

/// Retry behavior for transient model API failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    /// Total attempts per request, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    pub base_delay_ms: u64,
    /// Upper bound for any single delay, in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 1000,
            max_delay_secs: 60,
        }
    }
}

/// Artifact processing options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Model identifier passed to the API.
    pub model: String,
    /// Maximum model turns per artifact.
    pub max_turns: u32,
    /// Keep going after an artifact fails.
    pub ignore_failed: bool,
    /// Create the output directory when it does not exist.
    pub create_output: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_turns: 32,
            ignore_failed: false,
            create_output: false,
        }
    }
}

/// Git options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Name or path of the git executable.
    pub executable: String,
    /// Commit author name written to the new repository's config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Commit author email written to the new repository's config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: "git".to_string(),
            author_name: None,
            author_email: None,
        }
    }
}

/// Check that a model identifier is something the API can route.
///
/// # Errors
///
/// Returns `ConfigError::InvalidModel` for empty names or names with
/// whitespace or other characters no provider uses.
pub fn validate_model_name(model: &str) -> Result<(), ConfigError> {
    if model.is_empty() {
        return Err(ConfigError::InvalidModel {
            model: model.to_string(),
            message: "model name is empty".to_string(),
        });
    }
    let pattern =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._:/@+-]*$").map_err(|e| ConfigError::InvalidModel {
            model: model.to_string(),
            message: format!("failed to compile model pattern: {e}"),
        })?;
    if !pattern.is_match(model) {
        return Err(ConfigError::InvalidModel {
            model: model.to_string(),
            message: "expected letters, digits and '._:/@+-'".to_string(),
        });
    }
    Ok(())
}
