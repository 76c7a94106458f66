// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for artifact-replay.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. artifact-replay.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. REPLAY_* env vars
//! 5. CLI flags (-m, --ignore-failed, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! REPLAY_RUN__MODEL=gpt-4o          → run.model = "gpt-4o"
//! REPLAY_API__BASE_URL=http://...   → api.base_url = "http://..."
//! REPLAY_RETRY__MAX_ATTEMPTS=2      → retry.max_attempts = 2
//! ```
//!
//! The API key itself is never part of `Config`; it is read from the
//! variable named by `api.key_env` when a run starts.

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{ApiConfig, GitConfig, GlobalConfig, RetryConfig, RunConfig, validate_model_name};

/// Name of the optional configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "artifact-replay.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "REPLAY";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Model API options.
    pub api: ApiConfig,
    /// Retry options for the model API.
    pub retry: RetryConfig,
    /// Artifact processing options.
    pub run: RunConfig,
    /// Git options.
    pub git: GitConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use artifact_replay::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("replay/base.toml")
    ///     .add_toml_file_optional("artifact-replay.toml")
    ///     .with_env_prefix("REPLAY")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        validate_model_name(&self.run.model)?;

        if self.run.max_turns == 0 {
            return Err(invalid("run", "max_turns", "must be at least 1"));
        }
        if self.retry.max_attempts == 0 {
            return Err(invalid("retry", "max_attempts", "must be at least 1"));
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api", "timeout_secs", "must be at least 1"));
        }
        if !(0.0..=2.0).contains(&self.api.temperature) {
            return Err(invalid("api", "temperature", "must be within 0.0..=2.0"));
        }
        if !(0.0..=1.0).contains(&self.api.top_p) {
            return Err(invalid("api", "top_p", "must be within 0.0..=1.0"));
        }
        if reqwest::Url::parse(&self.api.base_url).is_err() {
            return Err(invalid("api", "base_url", "must be an absolute URL"));
        }
        if self.api.key_env.trim().is_empty() {
            return Err(invalid("api", "key_env", "must name an environment variable"));
        }
        if self.git.executable.trim().is_empty() {
            return Err(invalid("git", "executable", "must not be empty"));
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`. The credential is
    /// shown only as set/unset.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global/output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global/file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global/log_file",
            self.global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        );

        options.insert("api/base_url", self.api.base_url.clone());
        options.insert("api/key_env", self.api.key_env.clone());
        let key_state = if self.api.credential().is_ok() {
            "[hidden]"
        } else {
            "[unset]"
        };
        options.insert("api/key", key_state.to_string());
        options.insert("api/timeout_secs", self.api.timeout_secs.to_string());
        options.insert("api/temperature", self.api.temperature.to_string());
        options.insert("api/top_p", self.api.top_p.to_string());

        options.insert("retry/max_attempts", self.retry.max_attempts.to_string());
        options.insert("retry/base_delay_ms", self.retry.base_delay_ms.to_string());
        options.insert("retry/max_delay_secs", self.retry.max_delay_secs.to_string());

        options.insert("run/model", self.run.model.clone());
        options.insert("run/max_turns", self.run.max_turns.to_string());
        options.insert("run/ignore_failed", self.run.ignore_failed.to_string());
        options.insert("run/create_output", self.run.create_output.to_string());

        options.insert("git/executable", self.git.executable.clone());
        options.insert(
            "git/author_name",
            self.git.author_name.clone().unwrap_or_default(),
        );
        options.insert(
            "git/author_email",
            self.git.author_email.clone().unwrap_or_default(),
        );

        let width = options.keys().map(|k| k.len()).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:width$} = {value}"))
            .collect()
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
