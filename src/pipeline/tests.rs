// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Pipeline, RunReport, RunSettings};
use crate::analysis::tools::{CREATE_FILE, UPDATE_FILE};
use crate::config::types::GitConfig;
use crate::error::{AnalysisError, PreconditionError, ReplayError};
use crate::git::backend::{GitQuery, GixBackend, ShellBackend};
use crate::git::ops::locate_git;
use crate::llm::test_utils::ScriptedModel;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

struct Fixture {
    _temp: TempDir,
    input: PathBuf,
    output: PathBuf,
}

fn fixture(artifacts: &[(&str, &str)]) -> Fixture {
    let temp = temp_dir();
    let input = temp.path().join("input");
    let output = temp.path().join("output");
    fs::create_dir(&input).unwrap();
    fs::create_dir(&output).unwrap();
    for (name, content) in artifacts {
        fs::write(input.join(name), content).unwrap();
    }
    Fixture {
        _temp: temp,
        input,
        output,
    }
}

fn settings(fx: &Fixture, ignore_failed: bool) -> RunSettings {
    RunSettings::builder()
        .input(&fx.input)
        .output(&fx.output)
        .model("gpt-4o-mini")
        .max_turns(4)
        .ignore_failed(ignore_failed)
        .git(GitConfig {
            author_name: Some("Replay Test".to_string()),
            author_email: Some("replay@test.invalid".to_string()),
            ..GitConfig::default()
        })
        .build()
}

fn git() -> ShellBackend {
    locate_git(&GitConfig::default()).expect("git must be on PATH for tests")
}

fn summaries(output: &Path) -> Vec<String> {
    GixBackend
        .commit_log(output)
        .unwrap()
        .into_iter()
        .map(|c| c.summary)
        .collect()
}

#[tokio::test]
async fn test_two_artifacts_two_commits() {
    let fx = fixture(&[
        ("spec1.txt", "create hello.txt with content Hi"),
        ("spec2.txt", "update hello.txt to say Bye"),
    ]);
    let model = ScriptedModel::new()
        .then_calls(&[(CREATE_FILE, r#"{"path":"hello.txt","content":"Hi"}"#)])
        .then_done()
        .then_calls(&[(UPDATE_FILE, r#"{"path":"hello.txt","content":"Bye"}"#)])
        .then_done();

    let report = Pipeline::new(&model, git(), settings(&fx, false))
        .run()
        .await
        .unwrap();

    assert_eq!(report.committed, ["spec1.txt", "spec2.txt"]);
    assert_eq!(report.operations, 2);
    assert!(report.is_success());
    assert_eq!(fs::read_to_string(fx.output.join("hello.txt")).unwrap(), "Bye");

    let log = GixBackend.commit_log(&fx.output).unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].summary, "spec1.txt");
    assert_eq!(log[0].body, "create hello.txt with content Hi");
    assert_eq!(log[1].summary, "spec2.txt");
    assert_eq!(log[1].body, "update hello.txt to say Bye");
    assert_eq!(report.head.as_deref(), Some(log[1].id.as_str()));
}

#[tokio::test]
async fn test_non_empty_output_makes_no_calls() {
    let fx = fixture(&[("spec1.txt", "anything")]);
    fs::write(fx.output.join("stale.txt"), "old").unwrap();
    let model = ScriptedModel::new().then_done();

    let err = Pipeline::new(&model, git(), settings(&fx, false))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReplayError::Precondition(ref inner) if matches!(**inner, PreconditionError::OutputNotEmpty { .. })
    ));
    assert_eq!(model.calls(), 0);
    assert!(!fx.output.join(".git").exists());
}

#[tokio::test]
async fn test_missing_input_initializes_nothing() {
    let fx = fixture(&[]);
    fs::remove_dir(&fx.input).unwrap();
    let model = ScriptedModel::new();

    let err = Pipeline::new(&model, git(), settings(&fx, false))
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, ReplayError::Precondition(_)));
    assert!(!fx.output.join(".git").exists());
}

#[tokio::test]
async fn test_artifact_without_changes_still_commits() {
    let fx = fixture(&[("1_layout.txt", "src/\n  lib.rs\n"), ("2_lib.txt", "// lib.rs\nfn main() {}\n")]);
    let model = ScriptedModel::new()
        .then_done()
        .then_calls(&[(CREATE_FILE, r#"{"path":"lib.rs","content":"fn main() {}\n"}"#)])
        .then_done();

    let report = Pipeline::new(&model, git(), settings(&fx, false))
        .run()
        .await
        .unwrap();
    assert_eq!(report.committed, ["1_layout.txt", "2_lib.txt"]);
    assert_eq!(summaries(&fx.output), ["1_layout.txt", "2_lib.txt"]);
}

#[tokio::test]
async fn test_fail_fast_keeps_prior_commits() {
    let fx = fixture(&[("a.txt", "one"), ("b.txt", "two"), ("c.txt", "three")]);
    let model = ScriptedModel::new()
        .then_done()
        .then(Err(AnalysisError::Http {
            status: 400,
            message: "bad request".to_string(),
            retry_after: None,
        }));

    let err = Pipeline::new(&model, git(), settings(&fx, false))
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, ReplayError::Analysis(_)));
    assert_eq!(summaries(&fx.output), ["a.txt"]);
    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn test_ignore_failed_continues() {
    let fx = fixture(&[("a.txt", "one"), ("b.txt", "two"), ("c.txt", "three")]);
    let model = ScriptedModel::new()
        .then_calls(&[(CREATE_FILE, r#"{"path":"a.out","content":"1"}"#)])
        .then_done()
        .then_calls(&[(CREATE_FILE, r#"{"path":"../escape","content":"2"}"#)])
        .then_calls(&[(CREATE_FILE, r#"{"path":"c.out","content":"3"}"#)])
        .then_done();

    let report = Pipeline::new(&model, git(), settings(&fx, true))
        .run()
        .await
        .unwrap();

    assert_eq!(report.committed, ["a.txt", "c.txt"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "b.txt");
    assert!(report.failed[0].error.contains("../escape"));
    assert!(!report.is_success());
    assert_eq!(report.processed(), 3);
    assert_eq!(summaries(&fx.output), ["a.txt", "c.txt"]);
}

#[tokio::test]
async fn test_cancelled_run_skips_everything() {
    let fx = fixture(&[("a.txt", "one"), ("b.txt", "two")]);
    let model = ScriptedModel::new();
    let token = CancellationToken::new();
    token.cancel();

    let report = Pipeline::new(&model, git(), settings(&fx, false))
        .with_cancel_token(token)
        .run()
        .await
        .unwrap();

    assert_eq!(
        report,
        RunReport {
            skipped: vec!["a.txt".to_string(), "b.txt".to_string()],
            ..RunReport::default()
        }
    );
    assert_eq!(model.calls(), 0);
    assert!(summaries(&fx.output).is_empty());
}

#[tokio::test]
async fn test_create_output_option() {
    let fx = fixture(&[("a.txt", "one")]);
    fs::remove_dir(&fx.output).unwrap();
    let model = ScriptedModel::new().then_done();

    let strict = Pipeline::new(&model, git(), settings(&fx, false)).run().await;
    assert!(matches!(strict, Err(ReplayError::Precondition(_))));

    let mut relaxed = settings(&fx, false);
    relaxed.create_output = true;
    let report = Pipeline::new(&model, git(), relaxed).run().await.unwrap();
    assert_eq!(report.committed, ["a.txt"]);
}
