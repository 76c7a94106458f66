// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns one artifact into file operations through a model session.
//!
//! ```text
//! prompt::conversation(artifact)
//!        |
//!        v
//!   Session::run ----> ChatModel::complete ----> reply
//!        ^                                         |
//!        |                       tool calls?  no --+--> done
//!        |                                    yes
//!        |                                     v
//!        |                     tools::decode (strict) -> FileOperation
//!        |                                     v
//!        +------- tool results <------ FileExecutor::execute
//! ```

pub mod prompt;
pub mod session;
pub mod tools;


pub use session::{Session, SessionSummary};

/// A file instruction decoded from a model tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    /// Write a new file.
    Create { path: String, content: String },
    /// Replace an existing file's content.
    Update { path: String, content: String },
    /// Return a file's content to the model.
    Read { path: String },
}

impl FileOperation {
    /// Path as given by the model.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Create { path, .. } | Self::Update { path, .. } | Self::Read { path } => path,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Read { .. } => "read",
        }
    }
}
