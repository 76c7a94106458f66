// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional(artifact-replay.toml)   cwd
//!   .add_toml_file(--config FILE)                   repeatable, must exist
//!   .add_toml_str(..)                               tests, inline defaults
//!   .with_env_prefix("REPLAY")                      REPLAY_RUN__MODEL=..
//!   .set("run.model", ..)                           CLI flags
//!        |
//!        v
//!    build() --> Config (validated)
//! ```
//!
//! Sources added later win. Environment variables are applied after every
//! file regardless of call order, and `set` overrides beat everything.

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// Where a configuration layer came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config FILE`.
    File(PathBuf),
    /// Optional file that was present on disk.
    Optional(PathBuf),
    /// Inline TOML.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::Optional(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[string] <string>"),
        }
    }
}

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Add a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.sources.push(ConfigSource::File(path.to_path_buf()));
        self
    }

    /// Add a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.is_file() {
            self.sources.push(ConfigSource::Optional(path.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Read `<PREFIX>_<SECTION>__<KEY>` environment variables.
    ///
    /// Keys contain underscores, so section and key are split on a double
    /// underscore.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Override a single dotted key, e.g. `run.max_turns`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the key path is malformed.
    pub fn set(mut self, key: &str, value: impl Into<config::Value>) -> Result<Self> {
        self.builder = self.builder.set_override(key, value).map_err(|e| {
            let (section, name) = key.split_once('.').unwrap_or(("", key));
            ConfigError::InvalidValue {
                section: section.to_string(),
                key: name.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(self)
    }

    /// Merge every layer and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing or malformed, a value
    /// has the wrong type or an unknown key, or [`Config::validate`] fails.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Layers added so far, in priority order.
    #[must_use]
    pub fn loaded_files(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// One numbered line per layer, for the `configs` command.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
