// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository setup and per-artifact commits.
//!
//! ```text
//! locate_git       resolve git.executable via PATH
//! init_repository  git init + optional local identity
//! record_commit    git add --all + git commit (verbatim message)
//! ```
//!
//! Raw `GitError`s are mapped to `ToolError` during setup and to
//! `CommitError` while recording.

use std::path::Path;

use tracing::{debug, info};

use super::backend::{GitMutation, ShellBackend};
use crate::artifact::Artifact;
use crate::config::types::GitConfig;
use crate::error::{CommitError, ReplayError, ReplayResult, ToolError};

/// Resolve the configured git executable.
///
/// # Errors
///
/// Returns `ToolError::ExecutableNotFound` if the executable is not on PATH.
pub fn locate_git(config: &GitConfig) -> ReplayResult<ShellBackend> {
    let program = which::which(&config.executable).map_err(|_| ToolError::ExecutableNotFound {
        name: config.executable.clone(),
    })?;
    debug!(git = %program.display(), "located git executable");
    Ok(ShellBackend::new(program))
}

/// Create an empty repository in `dir` and apply the configured identity.
///
/// # Errors
///
/// Returns `ToolError::InitFailed` if `git init` or `git config` fails.
pub fn init_repository(git: &ShellBackend, dir: &Path, config: &GitConfig) -> ReplayResult<()> {
    let init_failed = |err: ReplayError| ToolError::InitFailed {
        path: dir.to_path_buf(),
        message: err.to_string(),
    };

    git.init_repo(dir).map_err(init_failed)?;

    let identity = [
        ("user.name", config.author_name.as_deref()),
        ("user.email", config.author_email.as_deref()),
    ];
    for (key, value) in identity {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            git.set_config(dir, key, value).map_err(init_failed)?;
        }
    }

    info!(path = %dir.display(), "initialized repository");
    Ok(())
}

/// Commit message for an artifact: name, blank line, content.
#[must_use]
pub fn commit_message(artifact: &Artifact) -> String {
    format!("{}\n\n{}", artifact.name, artifact.content)
}

/// Stage everything and commit it under the artifact's name.
///
/// # Errors
///
/// Returns `CommitError::StageFailed` or `CommitError::CommitFailed`.
pub fn record_commit(git: &ShellBackend, dir: &Path, artifact: &Artifact) -> ReplayResult<()> {
    git.stage_all(dir).map_err(|e| CommitError::StageFailed {
        artifact: artifact.name.clone(),
        message: e.to_string(),
    })?;

    git.commit(dir, &commit_message(artifact))
        .map_err(|e| CommitError::CommitFailed {
            artifact: artifact.name.clone(),
            message: e.to_string(),
        })?;

    info!(artifact = %artifact.name, "committed");
    Ok(())
}
