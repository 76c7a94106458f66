// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing and the built binary.
//!
//! Tests the CLI module with realistic command-line argument patterns, then
//! runs the executable to check how config layers and startup checks meet.

use std::fs;
use std::path::Path;
use std::process::{Command as Process, Output};

use tempfile::TempDir;

use artifact_replay::cli::{self, Command};

// =============================================================================
// Informational Commands
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = cli::try_parse_from(["artifact-replay", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_options_and_configs_commands() {
    let cli = cli::try_parse_from(["artifact-replay", "options"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Options)));

    let cli = cli::try_parse_from(["artifact-replay", "configs"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Configs)));
}

#[test]
fn cli_no_command() {
    let cli = cli::try_parse_from(["artifact-replay"]).unwrap();
    assert!(cli.command.is_none());
}

// =============================================================================
// Run Command
// =============================================================================

#[test]
fn cli_run_minimal() {
    let cli = cli::try_parse_from(["artifact-replay", "run", "-i", "chats", "-o", "project"])
        .unwrap();
    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.input, Path::new("chats"));
    assert_eq!(args.output, Path::new("project"));
    assert!(args.model.is_none());
    assert!(!args.ignore_failed);
    assert!(args.to_config_overrides().is_empty());
}

#[test]
fn cli_run_all_flags() {
    let cli = cli::try_parse_from([
        "artifact-replay",
        "run",
        "--input",
        "chats",
        "--output",
        "project",
        "--model",
        "gpt-4o",
        "--ignore-failed",
        "--create-output",
        "--max-turns",
        "8",
    ])
    .unwrap();
    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run command");
    };

    let rendered: Vec<String> = args
        .to_config_overrides()
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    run.model=gpt-4o
    run.max_turns=8
    run.ignore_failed=true
    run.create_output=true
    ");
}

#[test]
fn cli_run_requires_directories() {
    assert!(cli::try_parse_from(["artifact-replay", "run"]).is_err());
    assert!(cli::try_parse_from(["artifact-replay", "run", "-i", "chats"]).is_err());
    assert!(cli::try_parse_from(["artifact-replay", "run", "-o", "project"]).is_err());
}

#[test]
fn cli_run_rejects_zero_turns() {
    let result = cli::try_parse_from([
        "artifact-replay",
        "run",
        "-i",
        "chats",
        "-o",
        "project",
        "--max-turns",
        "0",
    ]);
    assert!(result.is_err());
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_before_command() {
    let cli = cli::try_parse_from([
        "artifact-replay",
        "-c",
        "base.toml",
        "--config",
        "local.toml",
        "-l",
        "4",
        "--log-file",
        "replay.log",
        "run",
        "-i",
        "chats",
        "-o",
        "project",
    ])
    .unwrap();

    assert_eq!(cli.global.configs.len(), 2);
    let rendered: Vec<String> = cli
        .global
        .to_config_overrides()
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    global.output_log_level=4
    global.file_log_level=4
    global.log_file=replay.log
    ");
}

#[test]
fn cli_log_level_out_of_range() {
    assert!(cli::try_parse_from(["artifact-replay", "-l", "7", "options"]).is_err());
}

// =============================================================================
// Binary
// =============================================================================

const UNSET_KEY: &str = "ARTIFACT_REPLAY_TEST_UNSET_KEY";
const SET_KEY: &str = "ARTIFACT_REPLAY_TEST_SET_KEY";

/// Run the binary in an empty directory so no local config file is picked up.
fn replay(cwd: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Process::new(env!("CARGO_BIN_EXE_artifact-replay"));
    command
        .current_dir(cwd)
        .args(args)
        .env_remove(UNSET_KEY)
        .env_remove("REPLAY_RUN__MODEL");
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().unwrap()
}

/// Input with one artifact and an output that already holds a file.
fn occupied_workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("chats")).unwrap();
    fs::write(temp.path().join("chats").join("01_intro.md"), "hello").unwrap();
    fs::create_dir(temp.path().join("project")).unwrap();
    fs::write(temp.path().join("project").join("keep.txt"), "mine").unwrap();
    temp
}

#[test]
fn binary_missing_credential_fails_before_output_check() {
    let temp = occupied_workspace();

    let output = replay(
        temp.path(),
        &["run", "-i", "chats", "-o", "project"],
        &[("REPLAY_API__KEY_ENV", UNSET_KEY)],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing API credential"), "stderr: {stderr}");
    assert!(stderr.contains(UNSET_KEY), "stderr: {stderr}");
    assert!(!stderr.contains("not empty"), "stderr: {stderr}");
    assert!(!temp.path().join("project").join(".git").exists());
    assert_eq!(
        fs::read_to_string(temp.path().join("project").join("keep.txt")).unwrap(),
        "mine"
    );
}

#[test]
fn binary_options_reads_model_from_env() {
    let temp = TempDir::new().unwrap();

    let output = replay(temp.path(), &["options"], &[("REPLAY_RUN__MODEL", "gpt-4o")]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let model = stdout
        .lines()
        .find(|line| line.starts_with("run/model"))
        .unwrap();
    assert!(model.ends_with("= gpt-4o"), "line: {model}");
}

#[test]
fn binary_model_flag_beats_env() {
    let temp = occupied_workspace();

    let output = replay(
        temp.path(),
        &["run", "-i", "chats", "-o", "project", "-m", "gpt-4.1-mini"],
        &[
            ("REPLAY_RUN__MODEL", "gpt-4o"),
            ("REPLAY_API__KEY_ENV", SET_KEY),
            (SET_KEY, "sk-test"),
        ],
    );

    // The occupied output stops the run after the endpoint is logged.
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("model=gpt-4.1-mini"), "stderr: {stderr}");
    assert!(!stderr.contains("gpt-4o"), "stderr: {stderr}");
    assert!(stderr.contains("not empty"), "stderr: {stderr}");
    assert!(!temp.path().join("project").join(".git").exists());
}
