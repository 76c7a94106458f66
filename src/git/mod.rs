// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!          Public API
//!            ops.rs
//!              |
//!              v
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitQuery    GitMutation
//!   (gix, read)  (CLI, write)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .is_repo    .init_repo
//!    .log        .set_config
//!                .stage_all
//!                .commit
//! ```
//!
//! **`GixBackend`** reads history in-process. **`ShellBackend`** runs the git
//! CLI for every write.

pub mod backend;
pub mod ops;
