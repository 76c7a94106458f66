// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Run | Options | Configs | Version
//! ```

use std::path::Path;
use std::process::ExitCode;

use artifact_replay::cli::{self, Cli, Command};
use artifact_replay::cmd::config::{build_config_loader, run_configs_command, run_options_command};
use artifact_replay::cmd::run::run_replay_command;
use artifact_replay::config::types::GlobalConfig;
use artifact_replay::logging::{LogConfig, init_logging};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    match dispatch_command(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch_command(cli: &Cli) -> artifact_replay::error::Result<()> {
    let overrides = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return Ok(());
        }
        Some(Command::Run(args)) => args.to_config_overrides(),
        Some(Command::Options | Command::Configs) => Vec::new(),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            anyhow::bail!("No command specified");
        }
    };

    let loader = build_config_loader(Path::new("."), &cli.global, &overrides)?;
    if matches!(cli.command, Some(Command::Configs)) {
        run_configs_command(&loader.format_loaded_files());
        return Ok(());
    }

    let config = loader.build()?;
    let _log_guard = init_logging(&build_log_config(&config.global))
        .map_err(|e| e.context("failed to initialize logging"))?;

    match &cli.command {
        Some(Command::Options) => {
            run_options_command(&config);
            Ok(())
        }
        Some(Command::Run(args)) => {
            run_replay_command(args, &config, interrupt_token()).await
        }
        _ => Ok(()),
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_log_config(global: &GlobalConfig) -> LogConfig {
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(
            global
                .log_file
                .clone()
                .filter(|p| !p.as_os_str().is_empty()),
        )
        .build()
}

/// First Ctrl-C stops between artifacts, a second one exits immediately.
fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let listener = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("interrupt received, stopping after the current artifact");
        listener.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted");
            std::process::exit(130);
        }
    });
    token
}
