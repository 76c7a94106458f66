// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for artifact-replay using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! artifact-replay [global options] <command>
//! run -i <input> -o <output> [-m <model>] [--ignore-failed] [--create-output] [--max-turns N]
//! options
//! configs
//! version
//! ```

pub mod global;
pub mod run;


use crate::cli::global::GlobalOptions;
use crate::cli::run::RunArgs;
use clap::{Parser, Subcommand};

/// Artifact-to-Git Replay Tool
///
/// Replays a directory of LLM chat artifacts into a Git history.
#[derive(Debug, Parser)]
#[command(
    name = "artifact-replay",
    author,
    version,
    about = "Replays LLM chat artifacts into a Git history of generated files",
    long_about = "artifact-replay Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Each artifact file in the input directory is handed to a chat model\n\
                  that creates and updates files in the output directory through\n\
                  function calls. Every artifact becomes one commit whose message is\n\
                  the artifact's name followed by its content.",
    after_help = "CONFIGURATION:\n\n\
                  `artifact-replay.toml` in the current directory is loaded if present,\n\
                  then every --config file in order, then REPLAY_* environment\n\
                  variables (REPLAY_RUN__MODEL=gpt-4o), then command-line flags.\n\
                  The API key is read from OPENAI_API_KEY unless api.key_env names\n\
                  another variable."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files that were loaded.
    Configs,

    /// Processes every artifact into one commit each.
    Run(RunArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments from an iterator.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
