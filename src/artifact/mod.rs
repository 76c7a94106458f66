// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Input enumeration and artifact loading.
//!
//! ```text
//! input/
//!   10_popup.html    -> Numbered(10, ..)   3rd
//!   2_manifest.json  -> Numbered(2, ..)    1st
//!   2_zeta.txt       -> Numbered(2, ..)    2nd
//!   readme.txt       -> Named(..)          4th
//!   .hidden          -> skipped
//!   sub/             -> skipped (depth 1, files only)
//! ```

pub mod encoding;


use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, trace, warn};

use crate::error::{FsError, PreconditionError, ReplayResult};
use encoding::{SourceEncoding, decode_text};

/// One input file: its name and decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name, without directories.
    pub name: String,
    /// Decoded content, verbatim.
    pub content: String,
}

impl Artifact {
    /// Read and decode an artifact file.
    ///
    /// # Errors
    ///
    /// Returns `FsError::InvalidName` for a name that is not UTF-8 and
    /// `FsError::IoError` if the file cannot be read.
    pub fn load(path: &Path) -> ReplayResult<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| FsError::InvalidName {
                path: path.display().to_string(),
            })?
            .to_string();

        let bytes = std::fs::read(path).map_err(|e| FsError::io(path, e))?;
        let (content, source) = decode_text(&bytes);
        if source == SourceEncoding::Legacy {
            warn!(artifact = %name, "artifact is not valid UTF-8; decoded as Windows-1252");
        }
        trace!(artifact = %name, bytes = bytes.len(), ?source, "loaded artifact");

        Ok(Self { name, content })
    }
}

/// Processing order key for an artifact file name.
///
/// Names with a numeric prefix before the first `_` come first, by number.
/// Everything else follows. Ties fall back to the full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOrder {
    /// `<digits>_rest`
    Numbered(u64, String),
    /// Any other name.
    Named(String),
}

impl ArtifactOrder {
    #[must_use]
    pub fn of(name: &str) -> Self {
        name.split_once('_')
            .filter(|(prefix, _)| !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|(prefix, _)| prefix.parse().ok())
            .map_or_else(
                || Self::Named(name.to_string()),
                |n| Self::Numbered(n, name.to_string()),
            )
    }
}

impl Ord for ArtifactOrder {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numbered(a, an), Self::Numbered(b, bn)) => a.cmp(b).then_with(|| an.cmp(bn)),
            (Self::Numbered(..), Self::Named(_)) => Ordering::Less,
            (Self::Named(_), Self::Numbered(..)) => Ordering::Greater,
            (Self::Named(a), Self::Named(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for ArtifactOrder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// List artifact files directly inside `input`, in processing order.
///
/// Hidden entries, directories, symlinks and nested files are skipped.
/// Ignore files are not consulted.
///
/// # Errors
///
/// Returns `PreconditionError::InputMissing` if `input` is not a directory,
/// or `PreconditionError::InputUnreadable` if it cannot be listed.
pub fn list_artifacts(input: &Path) -> ReplayResult<Vec<PathBuf>> {
    if !input.is_dir() {
        return Err(PreconditionError::InputMissing {
            path: input.to_path_buf(),
        }
        .into());
    }

    let mut builder = WalkBuilder::new(input);
    builder
        .max_depth(Some(1))
        .hidden(true)
        .follow_links(false)
        .ignore(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false);

    let mut entries = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| PreconditionError::InputUnreadable {
            path: input.to_path_buf(),
            message: e.to_string(),
        })?;
        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "skipping artifact with non UTF-8 name");
            continue;
        };
        entries.push((ArtifactOrder::of(name), entry.into_path()));
    }

    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    debug!(count = entries.len(), input = %input.display(), "enumerated artifacts");
    Ok(entries.into_iter().map(|(_, path)| path).collect())
}
