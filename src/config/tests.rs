// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::types::{ApiConfig, Credential, validate_model_name};
use super::{Config, ConfigLoader};
use crate::error::ConfigError;
use crate::logging::LogLevel;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.run.model, "gpt-4o-mini");
    assert_eq!(config.run.max_turns, 32);
    assert!(!config.run.ignore_failed);
    assert_eq!(config.api.base_url, "https://api.openai.com/v1");
    assert_eq!(config.api.key_env, "OPENAI_API_KEY");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert!(config.validate().is_ok());
}

#[test]
fn test_completions_url_trims_slash() {
    let api = ApiConfig {
        base_url: "http://localhost:8080/v1/".to_string(),
        ..ApiConfig::default()
    };
    assert_eq!(
        api.completions_url(),
        "http://localhost:8080/v1/chat/completions"
    );
}

#[test]
fn test_credential_lookup() {
    let api = ApiConfig::default();

    let found = api
        .credential_from(|name| (name == "OPENAI_API_KEY").then(|| " sk-test ".to_string()))
        .unwrap();
    assert_eq!(found, Credential::new("sk-test"));

    let missing = api.credential_from(|_| None).unwrap_err();
    assert!(matches!(missing, ConfigError::MissingCredential { ref var } if var == "OPENAI_API_KEY"));

    let blank = api.credential_from(|_| Some("   ".to_string()));
    assert!(blank.is_err());
}

#[test]
fn test_credential_debug_is_hidden() {
    let credential = Credential::new("sk-very-secret");
    let rendered = format!("{credential:?}");
    assert!(!rendered.contains("sk-very-secret"));
    insta::assert_snapshot!(rendered, @"Credential([hidden])");
}

#[test]
fn test_model_name_validation() {
    for ok in ["gpt-4o-mini", "openai/gpt-4o", "ft:gpt-4o-mini:org::abc123", "llama3.1:8b"] {
        assert!(validate_model_name(ok).is_ok(), "{ok} should be accepted");
    }
    for bad in ["", "gpt 4o", "-gpt", "gpt-4o\n"] {
        assert!(validate_model_name(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn test_parse_overrides_defaults() {
    let config = Config::parse(
        r#"
[run]
model = "gpt-4o"
max_turns = 4
ignore_failed = true

[api]
base_url = "http://127.0.0.1:9999/v1"
temperature = 0.0

[git]
author_name = "Replay Bot"
author_email = "replay@example.com"
"#,
    )
    .unwrap();

    assert_eq!(config.run.model, "gpt-4o");
    assert_eq!(config.run.max_turns, 4);
    assert!(config.run.ignore_failed);
    assert_eq!(config.api.base_url, "http://127.0.0.1:9999/v1");
    assert!(config.api.temperature.abs() < f64::EPSILON);
    assert_eq!(config.api.top_p, ApiConfig::default().top_p);
    assert_eq!(config.git.author_name.as_deref(), Some("Replay Bot"));
    assert_eq!(config.git.executable, "git");
}

#[test]
fn test_parse_rejects_unknown_keys() {
    let result = Config::parse("[run]\nmodle = \"gpt-4o\"\n");
    assert!(result.is_err());
}

#[test]
fn test_parse_rejects_out_of_range_values() {
    for toml in [
        "[run]\nmax_turns = 0\n",
        "[api]\ntop_p = 1.5\n",
        "[api]\nbase_url = \"not a url\"\n",
        "[retry]\nmax_attempts = 0\n",
        "[run]\nmodel = \"bad model\"\n",
    ] {
        assert!(Config::parse(toml).is_err(), "{toml} should be rejected");
    }
}

#[test]
fn test_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[run]\nmodel = \"gpt-4o\"\n")
        .set("run.model", "gpt-4.1-mini")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.run.model, "gpt-4.1-mini");
}

#[test]
fn test_format_options_sorted_and_hidden() {
    let config = Config::default();
    let lines = config.format_options();

    let keys: Vec<&str> = lines
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);

    let key_line = lines
        .iter()
        .find(|line| line.starts_with("api/key "))
        .unwrap();
    assert!(key_line.ends_with("[hidden]") || key_line.ends_with("[unset]"));
}

#[test]
fn test_loaded_files_listing() {
    let loader = ConfigLoader::new()
        .add_toml_str("")
        .add_toml_file_optional("definitely-not-here.toml");
    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @"1. [string] <string>");
}
