// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the `run` command.

use clap::Args;
use std::path::PathBuf;

/// Arguments for `run`.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Directory containing the artifact files.
    #[arg(short = 'i', long = "input", value_name = "DIR")]
    pub input: PathBuf,

    /// Directory receiving the generated files and the repository.
    /// Must exist and be empty.
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: PathBuf,

    /// Model name [default: gpt-4o-mini].
    #[arg(short = 'm', long = "model", value_name = "MODEL")]
    pub model: Option<String>,

    /// Log failed artifacts and continue with the next one.
    #[arg(long = "ignore-failed")]
    pub ignore_failed: bool,

    /// Create the output directory if it does not exist.
    #[arg(long = "create-output")]
    pub create_output: bool,

    /// Maximum model turns per artifact.
    #[arg(long = "max-turns", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_turns: Option<u32>,
}

impl RunArgs {
    /// Converts the flags that map onto configuration keys.
    ///
    /// Boolean flags only ever switch an option on.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();

        if let Some(ref model) = self.model {
            overrides.push(("run.model", model.clone()));
        }
        if let Some(turns) = self.max_turns {
            overrides.push(("run.max_turns", turns.to_string()));
        }
        if self.ignore_failed {
            overrides.push(("run.ignore_failed", "true".to_string()));
        }
        if self.create_output {
            overrides.push(("run.create_output", "true".to_string()));
        }

        overrides
    }
}
