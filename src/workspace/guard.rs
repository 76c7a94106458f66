// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{PreconditionError, ReplayResult};

/// Check that `output` is an empty directory.
///
/// With `create_missing`, a nonexistent directory is created instead of
/// rejected. An existing non-empty directory is always rejected.
///
/// # Errors
///
/// Returns a `PreconditionError` describing the first failed check.
pub fn ensure_empty_output(output: &Path, create_missing: bool) -> ReplayResult<()> {
    let inaccessible = |source| PreconditionError::OutputInaccessible {
        path: output.to_path_buf(),
        source,
    };

    let metadata = match std::fs::metadata(output) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound && create_missing => {
            std::fs::create_dir_all(output).map_err(inaccessible)?;
            info!(path = %output.display(), "created output directory");
            return Ok(());
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PreconditionError::OutputMissing {
                path: output.to_path_buf(),
            }
            .into());
        }
        Err(e) => return Err(inaccessible(e).into()),
    };

    if !metadata.is_dir() {
        return Err(PreconditionError::OutputNotDirectory {
            path: output.to_path_buf(),
        }
        .into());
    }

    let entries = std::fs::read_dir(output)
        .map_err(inaccessible)?
        .count();
    if entries > 0 {
        return Err(PreconditionError::OutputNotEmpty {
            path: output.to_path_buf(),
            entries,
        }
        .into());
    }

    debug!(path = %output.display(), "output directory is empty");
    Ok(())
}
