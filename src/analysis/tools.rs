// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool schema offered to the model and strict decoding of its calls.
//!
//! ```text
//! create_file {path, content} -> FileOperation::Create
//! update_file {path, content} -> FileOperation::Update
//! read_file   {path}          -> FileOperation::Read
//! anything else               -> AnalysisError::InvalidToolCall
//! ```

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::FileOperation;
use crate::error::AnalysisError;
use crate::llm::{ToolCall, ToolDefinition};

pub const CREATE_FILE: &str = "create_file";
pub const UPDATE_FILE: &str = "update_file";
pub const READ_FILE: &str = "read_file";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WriteArgs {
    path: String,
    content: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ReadArgs {
    path: String,
}

/// The fixed tool set.
#[must_use]
pub fn definitions() -> Vec<ToolDefinition> {
    let write_schema = json!({
        "type": "object",
        "properties": {
            "path": {
                "type": "string",
                "description": "File path relative to the project root."
            },
            "content": {
                "type": "string",
                "description": "Complete new content of the file."
            }
        },
        "required": ["path", "content"],
        "additionalProperties": false
    });

    vec![
        ToolDefinition::function(
            CREATE_FILE,
            "Create a file with the given content. Parent directories are created as needed.",
            write_schema.clone(),
        ),
        ToolDefinition::function(
            UPDATE_FILE,
            "Replace the entire content of a file.",
            write_schema,
        ),
        ToolDefinition::function(
            READ_FILE,
            "Return the current content of a file.",
            json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "File path relative to the project root."
                    }
                },
                "required": ["path"],
                "additionalProperties": false
            }),
        ),
    ]
}

/// Decode one tool call into a [`FileOperation`].
///
/// # Errors
///
/// Returns `AnalysisError::InvalidToolCall` for unknown tools, arguments that
/// are not a JSON object, and missing, mistyped or unexpected fields.
pub fn decode(call: &ToolCall) -> Result<FileOperation, AnalysisError> {
    let name = call.function.name.as_str();
    match name {
        CREATE_FILE => {
            let args: WriteArgs = arguments(call)?;
            Ok(FileOperation::Create {
                path: args.path,
                content: args.content,
            })
        }
        UPDATE_FILE => {
            let args: WriteArgs = arguments(call)?;
            Ok(FileOperation::Update {
                path: args.path,
                content: args.content,
            })
        }
        READ_FILE => {
            let args: ReadArgs = arguments(call)?;
            Ok(FileOperation::Read { path: args.path })
        }
        _ => Err(invalid(call, "unknown tool")),
    }
}

fn arguments<T: DeserializeOwned>(call: &ToolCall) -> Result<T, AnalysisError> {
    let value: serde_json::Value = serde_json::from_str(&call.function.arguments)
        .map_err(|e| invalid(call, &format!("arguments are not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(invalid(call, "arguments must be a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| invalid(call, &e.to_string()))
}

fn invalid(call: &ToolCall, message: &str) -> AnalysisError {
    AnalysisError::InvalidToolCall {
        name: call.function.name.clone(),
        message: message.to_string(),
    }
}
