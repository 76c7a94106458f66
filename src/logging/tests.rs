// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use std::path::Path;

#[derive(Debug, serde::Deserialize)]
struct Wrapper {
    level: LogLevel,
}

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
    assert_eq!(u8::from(LogLevel::DEBUG), 4);
}

#[test]
fn test_log_level_deserializes_from_integer() {
    let parsed: Wrapper = serde_json::from_str(r#"{"level": 5}"#).unwrap();
    assert_eq!(parsed.level, LogLevel::TRACE);

    let err = serde_json::from_str::<Wrapper>(r#"{"level": 7}"#).unwrap_err();
    assert!(err.to_string().contains("log level must be 0-6"));

    assert_eq!(serde_json::to_string(&LogLevel::WARN).unwrap(), "2");
}

#[test]
fn test_filter_strings_scope_crate() {
    insta::assert_snapshot!(LogLevel::INFO.to_filter_string(), @"warn,artifact_replay=info");
    insta::assert_snapshot!(LogLevel::DUMP.to_filter_string(), @"trace");
    insta::assert_snapshot!(LogLevel::SILENT.to_filter_string(), @"off");
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.show_target());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .with_log_file("logs/replay.log")
        .build();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.log_file(), Some(Path::new("logs/replay.log")));
}
