// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 ReplayError (~24 bytes)
//!                        |
//!   +------+------+------+------+------+------+------+------+
//!   |      |      |      |      |      |      |      |      |
//!   v      v      v      v      v      v      v      v      v
//! Precond Config Tool Analysis Path  Commit  Git    Fs   Io/Other
//!   Box    Box   Box    Box    Box    Box    Box    Box  Box<str>
//!
//! Sub-errors:
//!   Precondition OutputNotEmpty, OutputMissing, InputMissing
//!   Config       MissingCredential, InvalidModel, InvalidValue
//!   Tool         ExecutableNotFound, InitFailed
//!   Analysis     Http, Network, Timeout, Decode, InvalidToolCall
//!   PathEscape   Absolute, ParentTraversal, Symlink, Reserved
//!   Commit       StageFailed, CommitFailed
//! ```

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ReplayError`].
pub type ReplayResult<T> = std::result::Result<T, ReplayError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Input or output directory does not satisfy the run preconditions.
    #[error("precondition failed: {0}")]
    Precondition(#[from] Box<PreconditionError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// A required external tool is unavailable.
    #[error("tool unavailable: {0}")]
    ToolUnavailable(#[from] Box<ToolError>),

    /// The language model call or its response failed.
    #[error("analysis error: {0}")]
    Analysis(#[from] Box<AnalysisError>),

    /// A model-requested path escapes the output directory.
    #[error("path rejected: {0}")]
    PathEscape(#[from] Box<PathEscapeError>),

    /// Recording a commit failed.
    #[error("commit error: {0}")]
    Commit(#[from] Box<CommitError>),

    /// Raw git command failure.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl ReplayError {
    /// Create a generic [`ReplayError::Other`].
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ReplayError {
                fn from(err: $error) -> Self {
                    ReplayError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    PreconditionError => Precondition,
    ConfigError => Config,
    ToolError => ToolUnavailable,
    AnalysisError => Analysis,
    PathEscapeError => PathEscape,
    CommitError => Commit,
    GitError => Git,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Precondition Errors ---

/// Run preconditions on the input and output directories.
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// Output directory does not exist.
    #[error("output directory does not exist: {}", path.display())]
    OutputMissing { path: PathBuf },

    /// Output path exists but is not a directory.
    #[error("output path is not a directory: {}", path.display())]
    OutputNotDirectory { path: PathBuf },

    /// Output directory already has content.
    #[error("output directory '{}' is not empty ({entries} entries); provide an empty directory", path.display())]
    OutputNotEmpty { path: PathBuf, entries: usize },

    /// Output directory cannot be inspected.
    #[error("output directory '{}' is not accessible: {source}", path.display())]
    OutputInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input directory does not exist or is not a directory.
    #[error("input directory does not exist: {}", path.display())]
    InputMissing { path: PathBuf },

    /// Input directory cannot be listed.
    #[error("input directory '{}' cannot be listed: {message}", path.display())]
    InputUnreadable { path: PathBuf, message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// API credential is not set in the environment.
    #[error("missing API credential: environment variable '{var}' is not set or empty")]
    MissingCredential { var: String },

    /// Model identifier is not usable.
    #[error("invalid model name '{model}': {message}")]
    InvalidModel { model: String, message: String },

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Tool Errors ---

/// External tool availability errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Repository initialization failed.
    #[error("failed to initialize repository in {}: {message}", path.display())]
    InitFailed { path: PathBuf, message: String },
}

// --- Analysis Errors ---

/// Language model call errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Non-success HTTP status from the API.
    #[error("http error {status}: {message}")]
    Http {
        status: u16,
        message: String,
        /// Server-requested wait from a `Retry-After` header.
        retry_after: Option<Duration>,
    },

    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout.
    #[error("request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The model called a tool outside the schema or with bad arguments.
    #[error("invalid tool call '{name}': {message}")]
    InvalidToolCall { name: String, message: String },

    /// The session did not settle within the turn budget.
    #[error("artifact '{artifact}' still issuing tool calls after {limit} turns")]
    TurnLimitExceeded { artifact: String, limit: u32 },
}

impl AnalysisError {
    /// Wait the server asked for before the next attempt, if any.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Http { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Whether the failure is transient and the request may be retried.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Network(_) | Self::Timeout { .. } => true,
            Self::Decode(_) | Self::InvalidToolCall { .. } | Self::TurnLimitExceeded { .. } => {
                false
            }
        }
    }
}

// --- Path Escape Errors ---

/// Reason a model-supplied path was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeReason {
    /// Path is empty.
    Empty,
    /// Path is absolute or carries a drive/root prefix.
    Absolute,
    /// `..` components climb above the output root.
    ParentTraversal,
    /// An existing component resolves outside the root via a symlink.
    Symlink,
    /// Path addresses repository metadata.
    Reserved,
}

impl std::fmt::Display for EscapeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty path"),
            Self::Absolute => write!(f, "absolute path"),
            Self::ParentTraversal => write!(f, "climbs above the output directory"),
            Self::Symlink => write!(f, "resolves outside the output directory"),
            Self::Reserved => write!(f, "addresses repository metadata"),
        }
    }
}

/// A model-requested path that would leave the output directory.
#[derive(Debug, Error)]
#[error("'{path}' {reason}")]
pub struct PathEscapeError {
    pub path: String,
    pub reason: EscapeReason,
}

// --- Commit Errors ---

/// Commit recording errors.
#[derive(Debug, Error)]
pub enum CommitError {
    /// `git add` failed.
    #[error("failed to stage changes for '{artifact}': {message}")]
    StageFailed { artifact: String, message: String },

    /// `git commit` failed.
    #[error("failed to commit '{artifact}': {message}")]
    CommitFailed { artifact: String, message: String },
}

// --- Git Errors ---

/// Raw git invocation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command exited unsuccessfully.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Git could not be spawned.
    #[error("failed to execute {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Repository query through gix failed.
    #[error("repository query failed in {path}: {message}")]
    Query { path: String, message: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// File name cannot be used as an artifact name.
    #[error("file name is not valid UTF-8: {path}")]
    InvalidName { path: String },

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
