// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scripted `ChatModel` double for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ChatModel, ChatReply, ChatRequest, FunctionCall, ToolCall};
use crate::error::AnalysisError;

/// Replays queued replies in order; an empty queue answers with no tool calls.
#[derive(Default)]
pub(crate) struct ScriptedModel {
    replies: Mutex<VecDeque<Result<ChatReply, AnalysisError>>>,
    requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn then(self, reply: Result<ChatReply, AnalysisError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn then_calls(self, calls: &[(&str, &str)]) -> Self {
        self.then(Ok(tool_reply(calls)))
    }

    pub(crate) fn then_done(self) -> Self {
        self.then(Ok(ChatReply {
            content: Some("done".to_string()),
            ..ChatReply::default()
        }))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// A reply carrying the given `(tool name, JSON arguments)` calls.
pub(crate) fn tool_reply(calls: &[(&str, &str)]) -> ChatReply {
    ChatReply {
        content: None,
        tool_calls: calls
            .iter()
            .enumerate()
            .map(|(i, (name, arguments))| ToolCall {
                id: format!("call_{i}"),
                kind: "function".to_string(),
                function: FunctionCall {
                    name: (*name).to_string(),
                    arguments: (*arguments).to_string(),
                },
            })
            .collect(),
        finish_reason: Some("tool_calls".to_string()),
    }
}

impl ChatModel for ScriptedModel {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ChatReply::default()))
    }
}
