// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `run` command.
//!
//! ```text
//! credential (env) --> locate git --> OpenAiClient --> Pipeline::run --> RunReport
//! ```
//!
//! The credential is checked first so a missing key fails before the output
//! directory is looked at.

use anyhow::{Context, bail};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::run::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::ops::locate_git;
use crate::llm::{OpenAiClient, RetryPolicy};
use crate::pipeline::{Pipeline, RunReport, RunSettings};

/// Run the replay described by `args` under `config`.
///
/// # Errors
///
/// Returns an error if setup fails, an artifact fails, or the run was
/// interrupted before every artifact was committed.
pub async fn run_replay_command(
    args: &RunArgs,
    config: &Config,
    cancel_token: CancellationToken,
) -> Result<()> {
    let credential = config.api.credential()?;
    let git = locate_git(&config.git)?;
    let client = OpenAiClient::new(&config.api, credential, RetryPolicy::from(&config.retry));
    info!(endpoint = client.url(), model = %config.run.model, "using chat endpoint");

    let settings = RunSettings::from_config(config, &args.input, &args.output);
    let report = Pipeline::new(&client, git, settings)
        .with_cancel_token(cancel_token)
        .run()
        .await
        .with_context(|| format!("replay into {} failed", args.output.display()))?;

    print_report(&report);
    check_report(&report)
}

fn print_report(report: &RunReport) {
    println!(
        "{} artifact(s) committed, {} failed, {} skipped",
        report.committed.len(),
        report.failed.len(),
        report.skipped.len()
    );
    if let Some(head) = &report.head {
        println!("  HEAD {head}");
    }
    for failed in &report.failed {
        println!("  failed: {} ({})", failed.name, failed.error);
    }
}

/// Turn an incomplete run into an error for the exit code.
///
/// # Errors
///
/// Returns an error if any artifact failed or was skipped.
pub fn check_report(report: &RunReport) -> Result<()> {
    if !report.failed.is_empty() {
        let names: Vec<&str> = report.failed.iter().map(|f| f.name.as_str()).collect();
        bail!(
            "{} artifact(s) failed: {}",
            report.failed.len(),
            names.join(", ")
        );
    }
    if !report.skipped.is_empty() {
        bail!(
            "interrupted; {} artifact(s) not processed",
            report.skipped.len()
        );
    }
    Ok(())
}
