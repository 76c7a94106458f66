// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Confinement of model-supplied paths to the output directory.
//!
//! ```text
//! "src/app.js"          -> <root>/src/app.js
//! "./a/../b.txt"        -> <root>/b.txt
//! ""  "."               -> Empty
//! "/etc/passwd"         -> Absolute
//! "../x"  "a/../../x"   -> ParentTraversal
//! ".git/config"         -> Reserved
//! "link/x" (link -> /)  -> Symlink
//! ```
//!
//! Lexical checks run first. Only existing ancestors are inspected on disk,
//! and nothing is created here.

use std::path::{Component, Path, PathBuf};

use crate::error::{EscapeReason, FsError, PathEscapeError, ReplayResult};

/// Name of the repository metadata directory.
const GIT_DIR: &str = ".git";

/// Resolve `raw` under `root`, rejecting anything that leaves it.
///
/// # Errors
///
/// Returns `PathEscapeError` for rejected paths and `FsError` if `root`
/// itself cannot be resolved.
pub fn confine(root: &Path, raw: &str) -> ReplayResult<PathBuf> {
    let relative = normalize(raw)?;

    let canonical_root = root.canonicalize().map_err(|e| FsError::io(root, e))?;
    let mut cursor = canonical_root.clone();
    for component in relative.components() {
        cursor.push(component);
        if std::fs::symlink_metadata(&cursor).is_err() {
            break;
        }
        // A dangling link has metadata but cannot be canonicalized.
        let resolved = cursor
            .canonicalize()
            .map_err(|_| escape(raw, EscapeReason::Symlink))?;
        if !resolved.starts_with(&canonical_root) {
            return Err(escape(raw, EscapeReason::Symlink).into());
        }
        if resolved
            .strip_prefix(&canonical_root)
            .ok()
            .and_then(|rest| rest.components().next())
            .is_some_and(|first| first.as_os_str().eq_ignore_ascii_case(GIT_DIR))
        {
            return Err(escape(raw, EscapeReason::Reserved).into());
        }
    }

    Ok(root.join(relative))
}

/// Lexically clean `raw` into a relative path with only normal components.
fn normalize(raw: &str) -> Result<PathBuf, PathEscapeError> {
    if raw.trim().is_empty() {
        return Err(escape(raw, EscapeReason::Empty));
    }

    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in Path::new(raw).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(escape(raw, EscapeReason::Absolute));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(escape(raw, EscapeReason::ParentTraversal));
                }
            }
            Component::Normal(part) => {
                if part.eq_ignore_ascii_case(GIT_DIR) {
                    return Err(escape(raw, EscapeReason::Reserved));
                }
                parts.push(part);
            }
        }
    }

    if parts.is_empty() {
        return Err(escape(raw, EscapeReason::Empty));
    }
    Ok(parts.iter().collect())
}

fn escape(raw: &str, reason: EscapeReason) -> PathEscapeError {
    PathEscapeError {
        path: raw.to_string(),
        reason,
    }
}
