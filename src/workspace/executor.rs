// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Applies file operations to the output tree.
//!
//! ```text
//! Create/Update --confine--> mkdir -p parent --> tempfile in parent --> persist
//! Read          --own name?--> artifact content
//!               --confine--> decode file | Missing (reported to the model)
//! ```

use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::paths::confine;
use crate::analysis::FileOperation;
use crate::artifact::Artifact;
use crate::artifact::encoding::decode_text;
use crate::error::{FsError, ReplayResult};

/// Result of one file operation, as reported back to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Content was written.
    Written {
        path: String,
        created: bool,
        bytes: usize,
    },
    /// Content was read.
    Content { path: String, content: String },
    /// A read targeted something that is not a readable file.
    Missing { path: String, message: String },
}

impl Outcome {
    /// Text sent back as the tool result.
    #[must_use]
    pub fn tool_result(&self) -> String {
        match self {
            Self::Written {
                path,
                created: true,
                bytes,
            } => format!("created {path} ({bytes} bytes)"),
            Self::Written { path, bytes, .. } => format!("updated {path} ({bytes} bytes)"),
            Self::Content { content, .. } => content.clone(),
            Self::Missing { path, message } => format!("error: cannot read {path}: {message}"),
        }
    }
}

/// Executes operations for one artifact against the output directory.
#[derive(Debug, Clone, Copy)]
pub struct FileExecutor<'a> {
    root: &'a Path,
    artifact: &'a Artifact,
}

impl<'a> FileExecutor<'a> {
    #[must_use]
    pub const fn new(root: &'a Path, artifact: &'a Artifact) -> Self {
        Self { root, artifact }
    }

    /// Apply a single operation.
    ///
    /// # Errors
    ///
    /// Returns `PathEscapeError` for paths outside the output directory and
    /// `FsError` if a write fails. A read of a missing file is not an error.
    pub fn execute(&self, operation: &FileOperation) -> ReplayResult<Outcome> {
        match operation {
            FileOperation::Create { path, content } | FileOperation::Update { path, content } => {
                self.write(path, content)
            }
            FileOperation::Read { path } => self.read(path),
        }
    }

    fn write(&self, raw: &str, content: &str) -> ReplayResult<Outcome> {
        let target = confine(self.root, raw)?;
        let parent = target.parent().unwrap_or(self.root);
        std::fs::create_dir_all(parent).map_err(|e| FsError::io(parent, e))?;

        let created = !target.exists();
        let mut staged = NamedTempFile::new_in(parent).map_err(|e| FsError::io(parent, e))?;
        staged
            .write_all(content.as_bytes())
            .map_err(|e| FsError::io(staged.path(), e))?;
        set_default_permissions(staged.as_file()).map_err(|e| FsError::io(&target, e))?;
        staged
            .persist(&target)
            .map_err(|e| FsError::io(&target, e.error))?;

        info!(path = raw, created, bytes = content.len(), "wrote file");
        Ok(Outcome::Written {
            path: raw.to_string(),
            created,
            bytes: content.len(),
        })
    }

    fn read(&self, raw: &str) -> ReplayResult<Outcome> {
        if raw == self.artifact.name {
            debug!(path = raw, "read resolved to the artifact itself");
            return Ok(Outcome::Content {
                path: raw.to_string(),
                content: self.artifact.content.clone(),
            });
        }

        let target = confine(self.root, raw)?;
        match std::fs::read(&target) {
            Ok(bytes) => {
                debug!(path = raw, bytes = bytes.len(), "read file");
                Ok(Outcome::Content {
                    path: raw.to_string(),
                    content: decode_text(&bytes).0,
                })
            }
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::NotFound | ErrorKind::NotADirectory | ErrorKind::IsADirectory
                ) =>
            {
                debug!(path = raw, error = %e, "read of unavailable file reported to model");
                let message = if e.kind() == ErrorKind::IsADirectory {
                    "is a directory"
                } else {
                    "no such file"
                };
                Ok(Outcome::Missing {
                    path: raw.to_string(),
                    message: message.to_string(),
                })
            }
            Err(e) => Err(FsError::io(&target, e).into()),
        }
    }
}

#[cfg(unix)]
fn set_default_permissions(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
const fn set_default_permissions(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}
