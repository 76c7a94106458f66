// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

use crate::error::{GitError, ReplayResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// One commit as seen by the history queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full hex object id.
    pub id: String,
    /// First line of the message.
    pub summary: String,
    /// Everything after the blank line following the summary.
    pub body: String,
}

impl CommitRecord {
    /// Split a raw commit message into summary and body.
    #[must_use]
    pub fn from_message(id: impl Into<String>, message: &str) -> Self {
        let (summary, body) = match message.split_once('\n') {
            Some((summary, rest)) => (summary, rest.strip_prefix('\n').unwrap_or(rest)),
            None => (message, ""),
        };
        Self {
            id: id.into(),
            summary: summary.to_string(),
            body: body.to_string(),
        }
    }
}

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// All commits reachable from HEAD, oldest first. Empty for an unborn HEAD.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened or walked.
    fn commit_log(&self, path: &Path) -> ReplayResult<Vec<CommitRecord>>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
pub trait GitMutation {
    /// Initialize a new repository.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository initialization fails.
    fn init_repo(&self, path: &Path) -> ReplayResult<()>;

    /// Set a repository-local config value.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the config value cannot be set.
    fn set_config(&self, repo_path: &Path, key: &str, value: &str) -> ReplayResult<()>;

    /// Stage every change in the work tree, including deletions.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git add` fails.
    fn stage_all(&self, repo_path: &Path) -> ReplayResult<()>;

    /// Commit the index with an exact message, even if nothing changed.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git commit` fails.
    fn commit(&self, repo_path: &Path, message: &str) -> ReplayResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Read-only; used for history inspection without spawning subprocesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct GixBackend;

fn query_error(path: &Path, err: impl std::fmt::Display) -> GitError {
    GitError::Query {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

impl GitQuery for GixBackend {
    fn commit_log(&self, path: &Path) -> ReplayResult<Vec<CommitRecord>> {
        let repo = gix::discover(path).map_err(|e| query_error(path, e))?;

        let head = repo.head().map_err(|e| query_error(path, e))?;
        if head.is_unborn() {
            return Ok(Vec::new());
        }

        let tip = repo.head_commit().map_err(|e| query_error(path, e))?;
        let walk = tip.ancestors().all().map_err(|e| query_error(path, e))?;

        let mut records = Vec::new();
        for info in walk {
            let info = info.map_err(|e| query_error(path, e))?;
            let commit = info.object().map_err(|e| query_error(path, e))?;
            let message = commit.message_raw().map_err(|e| query_error(path, e))?;
            records.push(CommitRecord::from_message(
                commit.id.to_string(),
                &String::from_utf8_lossy(message.as_ref()),
            ));
        }
        records.reverse();
        Ok(records)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    program: PathBuf,
}

impl Default for ShellBackend {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ShellBackend {
    /// Backend invoking the given git executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Path of the git executable this backend runs.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, args: &[&str], cwd: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }

    fn describe(args: &[&str]) -> String {
        format!("git {}", args.join(" "))
    }

    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(&self, args: &[&str], cwd: &Path) -> ReplayResult<String> {
        let output = self
            .command(args, cwd)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                command: Self::describe(args),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: Self::describe(args),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Execute a git command feeding `input` on stdin.
    pub(crate) fn git_command_with_stdin(
        &self,
        args: &[&str],
        cwd: &Path,
        input: &str,
    ) -> ReplayResult<String> {
        let spawn_failed = |source| GitError::SpawnFailed {
            command: Self::describe(args),
            source,
        };

        let mut child = self
            .command(args, cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_failed)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).map_err(spawn_failed)?;
        }

        let output = child.wait_with_output().map_err(spawn_failed)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(GitError::CommandFailed {
                command: Self::describe(args),
                message,
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitMutation for ShellBackend {
    fn init_repo(&self, path: &Path) -> ReplayResult<()> {
        self.git_command(&["init", "--quiet"], path)?;
        Ok(())
    }

    fn set_config(&self, repo_path: &Path, key: &str, value: &str) -> ReplayResult<()> {
        self.git_command(&["config", key, value], repo_path)?;
        Ok(())
    }

    fn stage_all(&self, repo_path: &Path) -> ReplayResult<()> {
        self.git_command(&["add", "--all"], repo_path)?;
        Ok(())
    }

    fn commit(&self, repo_path: &Path, message: &str) -> ReplayResult<()> {
        self.git_command_with_stdin(
            &[
                "commit",
                "--quiet",
                "--allow-empty",
                "--no-verify",
                "--cleanup=verbatim",
                "--file=-",
            ],
            repo_path,
            message,
        )?;
        Ok(())
    }
}
