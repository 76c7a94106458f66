// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output directory handling.
//!
//! ```text
//! guard     output must exist (or be created) and be empty
//! paths     model paths -> confined absolute paths
//! executor  create / update / read against the confined tree
//! ```

pub mod executor;
pub mod guard;
pub mod paths;


pub use executor::{FileExecutor, Outcome};
pub use guard::ensure_empty_output;
pub use paths::confine;
