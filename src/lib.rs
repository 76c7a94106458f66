// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          run / options / configs
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            v
//!                        pipeline
//!          guard -> list -> init -> per artifact
//!                            |
//!        +---------+---------+----------+
//!        v         v         v          v
//!    artifact   analysis    workspace   git
//!    list/load  model loop  confined IO gix/CLI
//!                  |
//!                  v
//!                 llm
//!        OpenAI-compatible chat + retry
//!
//!   +-----------------------------------------+
//!   |  foundation        error, logging       |
//!   +-----------------------------------------+
//! ```

pub mod analysis;
pub mod artifact;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod workspace;
