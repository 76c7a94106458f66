// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use tracing::{debug, info, warn};

use super::{FileOperation, prompt, tools};
use crate::artifact::Artifact;
use crate::error::{AnalysisError, ReplayResult};
use crate::llm::{ChatMessage, ChatModel, ChatRequest};
use crate::workspace::FileExecutor;

/// What one session did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Model requests made.
    pub turns: u32,
    /// Operations applied, in order.
    pub operations: Vec<FileOperation>,
    /// Why the model stopped, as reported on the final turn.
    pub finish_reason: Option<String>,
}

/// One model conversation for one artifact.
pub struct Session<'a, M> {
    model: &'a M,
    model_name: &'a str,
    max_turns: u32,
}

impl<'a, M: ChatModel> Session<'a, M> {
    pub const fn new(model: &'a M, model_name: &'a str, max_turns: u32) -> Self {
        Self {
            model,
            model_name,
            max_turns,
        }
    }

    /// Drive the conversation until the model stops calling tools.
    ///
    /// All calls of a turn are decoded before any is executed, so a turn with
    /// one bad call changes nothing.
    ///
    /// # Errors
    ///
    /// - `AnalysisError` for transport failures, invalid tool calls, or a
    ///   model still calling tools on its last allowed turn.
    /// - `PathEscapeError` / `FsError` from the executor.
    pub async fn run(
        &self,
        artifact: &Artifact,
        executor: &FileExecutor<'_>,
    ) -> ReplayResult<SessionSummary> {
        let mut request = ChatRequest {
            model: self.model_name.to_string(),
            messages: prompt::conversation(artifact),
            tools: tools::definitions(),
        };
        let mut summary = SessionSummary::default();

        loop {
            summary.turns += 1;
            let reply = self.model.complete(&request).await?;

            if reply.tool_calls.is_empty() {
                if let Some(text) = reply.content.as_deref().filter(|t| !t.trim().is_empty()) {
                    debug!(reply = text, "model finished");
                }
                if reply.finish_reason.as_deref() == Some("length") {
                    warn!(
                        artifact = %artifact.name,
                        "final reply was cut off at the token limit; output may be incomplete"
                    );
                }
                summary.finish_reason = reply.finish_reason;
                info!(
                    turns = summary.turns,
                    operations = summary.operations.len(),
                    "analysis complete"
                );
                return Ok(summary);
            }

            if summary.turns >= self.max_turns {
                return Err(AnalysisError::TurnLimitExceeded {
                    artifact: artifact.name.clone(),
                    limit: self.max_turns,
                }
                .into());
            }

            let operations = reply
                .tool_calls
                .iter()
                .map(tools::decode)
                .collect::<Result<Vec<_>, _>>()?;

            request.messages.push(ChatMessage::assistant(&reply));
            for (call, operation) in reply.tool_calls.iter().zip(operations) {
                debug!(
                    turn = summary.turns,
                    tool = operation.kind(),
                    path = operation.path(),
                    "tool call"
                );
                let outcome = executor.execute(&operation)?;
                request
                    .messages
                    .push(ChatMessage::tool_result(&call.id, outcome.tool_result()));
                summary.operations.push(operation);
            }
        }
    }
}
