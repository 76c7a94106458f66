// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifact processing driver.
//!
//! ```text
//! Pipeline::run
//!   ensure_empty_output(output)
//!   list_artifacts(input)
//!   init_repository(output)
//!   for each artifact (sequential):
//!       cancelled? --> skip the rest
//!       load --> Session::run --> record_commit
//!       error: fail fast, or log + continue (ignore_failed)
//!   --> RunReport
//! ```
//!
//! Nothing is rolled back: commits made before a failure stay.

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use bon::Builder;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::analysis::{Session, SessionSummary};
use crate::artifact::{Artifact, list_artifacts};
use crate::config::Config;
use crate::config::types::GitConfig;
use crate::error::ReplayResult;
use crate::git::backend::{GitQuery, GixBackend, ShellBackend};
use crate::git::ops::{init_repository, record_commit};
use crate::llm::ChatModel;
use crate::workspace::{FileExecutor, ensure_empty_output};

/// Inputs of one run.
#[derive(Debug, Clone, Builder)]
pub struct RunSettings {
    /// Directory holding artifact files.
    #[builder(into)]
    input: PathBuf,
    /// Empty directory that becomes the repository.
    #[builder(into)]
    output: PathBuf,
    /// Model identifier sent with every request.
    #[builder(into)]
    model: String,
    #[builder(default = 32)]
    max_turns: u32,
    #[builder(default = false)]
    ignore_failed: bool,
    #[builder(default = false)]
    create_output: bool,
    #[builder(default)]
    git: GitConfig,
}

impl RunSettings {
    /// Settings from the effective configuration plus the two directories.
    #[must_use]
    pub fn from_config(config: &Config, input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self::builder()
            .input(input)
            .output(output)
            .model(config.run.model.clone())
            .max_turns(config.run.max_turns)
            .ignore_failed(config.run.ignore_failed)
            .create_output(config.run.create_output)
            .git(config.git.clone())
            .build()
    }

    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// An artifact that failed under `ignore_failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedArtifact {
    pub name: String,
    pub error: String,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Artifacts committed, in order.
    pub committed: Vec<String>,
    /// Artifacts that failed and were skipped.
    pub failed: Vec<FailedArtifact>,
    /// Artifacts not attempted because the run was cancelled.
    pub skipped: Vec<String>,
    /// File operations applied across all artifacts.
    pub operations: usize,
    /// Id of the last commit, read back from the repository.
    pub head: Option<String>,
}

impl RunReport {
    /// Artifacts attempted.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.committed.len() + self.failed.len()
    }

    /// Every enumerated artifact was committed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Sequential artifact-to-commit driver.
pub struct Pipeline<'a, M> {
    model: &'a M,
    git: ShellBackend,
    settings: RunSettings,
    cancel_token: CancellationToken,
}

impl<'a, M: ChatModel> Pipeline<'a, M> {
    pub fn new(model: &'a M, git: ShellBackend, settings: RunSettings) -> Self {
        Self {
            model,
            git,
            settings,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Stop between artifacts once `token` is cancelled.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Process every artifact.
    ///
    /// # Errors
    ///
    /// - `PreconditionError` before anything is touched.
    /// - `ToolError` if the repository cannot be initialized.
    /// - Without `ignore_failed`, the first artifact failure.
    pub async fn run(&self) -> ReplayResult<RunReport> {
        let output = self.settings.output();
        ensure_empty_output(output, self.settings.create_output)?;
        let artifacts = list_artifacts(self.settings.input())?;
        init_repository(&self.git, output, &self.settings.git)?;

        info!(
            count = artifacts.len(),
            model = self.settings.model(),
            "processing artifacts"
        );

        let mut report = RunReport::default();
        for (index, path) in artifacts.iter().enumerate() {
            let name = display_name(path);

            if self.cancel_token.is_cancelled() {
                warn!(remaining = artifacts.len() - index, "run interrupted");
                report.skipped = artifacts[index..].iter().map(|p| display_name(p)).collect();
                break;
            }

            let span = info_span!("artifact", name = %name);
            match self.process(path).instrument(span).await {
                Ok(summary) => {
                    report.operations += summary.operations.len();
                    report.committed.push(name);
                }
                Err(e) if self.settings.ignore_failed => {
                    error!(artifact = %name, error = %e, "artifact failed, continuing");
                    report.failed.push(FailedArtifact {
                        name,
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        match GixBackend.commit_log(output) {
            Ok(log) => {
                if log.len() != report.committed.len() {
                    warn!(
                        commits = log.len(),
                        committed = report.committed.len(),
                        "history does not match the committed artifacts"
                    );
                }
                report.head = log.last().map(|commit| commit.id.clone());
                debug!(head = ?report.head, "history written");
            }
            Err(e) => warn!(error = %e, "could not read back history"),
        }

        info!(
            committed = report.committed.len(),
            failed = report.failed.len(),
            skipped = report.skipped.len(),
            operations = report.operations,
            "run finished"
        );
        Ok(report)
    }

    async fn process(&self, path: &Path) -> ReplayResult<SessionSummary> {
        let artifact = Artifact::load(path)?;
        let output = self.settings.output();
        let executor = FileExecutor::new(output, &artifact);

        let summary = Session::new(self.model, self.settings.model(), self.settings.max_turns)
            .run(&artifact, &executor)
            .await?;

        record_commit(&self.git, output, &artifact)?;
        Ok(summary)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
