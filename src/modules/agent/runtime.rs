use std::collections::BTreeMap;
use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{ThreadMemory, ToolRegistry};
use crate::core::error::{AppError, Result};
use crate::modules::llm::{ChatMessage, ChatModel, ModelDelta, ToolCall};
use crate::shared::constants::STREAM_CHANNEL_CAPACITY;

/// Tool-calling agent loop over a [`ChatModel`].
///
/// Each run reads the thread history once, streams model turns until one
/// ends without tool calls, then appends the new transcript to memory.
#[derive(Clone)]
pub struct AgentRuntime {
    model: Arc<dyn ChatModel>,
    tools: ToolRegistry,
    memory: Arc<ThreadMemory>,
    max_iterations: usize,
}

enum RunOutcome {
    Finished,
    ClientGone,
}

#[derive(Default)]
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
}

impl PendingToolCall {
    fn into_call(self) -> Option<ToolCall> {
        if self.name.is_empty() {
            return None;
        }
        let id = if self.id.is_empty() {
            format!("call_{}", Uuid::new_v4().simple())
        } else {
            self.id
        };
        Some(ToolCall {
            id,
            name: self.name,
            arguments: self.arguments,
        })
    }
}

impl AgentRuntime {
    pub fn new(
        model: Arc<dyn ChatModel>,
        tools: ToolRegistry,
        memory: Arc<ThreadMemory>,
        max_iterations: usize,
    ) -> Self {
        Self {
            model,
            tools,
            memory,
            max_iterations,
        }
    }

    /// Start a run in the background and return its text chunks.
    ///
    /// A failure after the run started arrives as the last item of the channel.
    pub fn stream(
        &self,
        thread_id: String,
        system_prompt: String,
        user_message: String,
    ) -> mpsc::Receiver<Result<String>> {
        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        let runtime = self.clone();

        tokio::spawn(async move {
            if let Err(e) = runtime
                .run(&thread_id, system_prompt, user_message, &tx)
                .await
            {
                error!("Agent run failed for thread {}: {}", thread_id, e);
                let _ = tx.send(Err(e)).await;
            }
        });

        rx
    }

    async fn run(
        &self,
        thread_id: &str,
        system_prompt: String,
        user_message: String,
        tx: &mpsc::Sender<Result<String>>,
    ) -> Result<()> {
        let history = self.memory.history(thread_id).await;
        let mut transcript = vec![ChatMessage::User(user_message)];

        let outcome = self
            .drive(thread_id, &system_prompt, &history, &mut transcript, tx)
            .await;

        // Tool failures never abort a turn, so the transcript only ever ends
        // on a complete assistant/tool exchange and can always be kept.
        self.memory.append(thread_id, transcript).await;

        match outcome? {
            RunOutcome::Finished => debug!("Agent run finished for thread {}", thread_id),
            RunOutcome::ClientGone => {
                info!("Client disconnected, stopped agent run for thread {}", thread_id)
            }
        }
        Ok(())
    }

    async fn drive(
        &self,
        thread_id: &str,
        system_prompt: &str,
        history: &[ChatMessage],
        transcript: &mut Vec<ChatMessage>,
        tx: &mpsc::Sender<Result<String>>,
    ) -> Result<RunOutcome> {
        for iteration in 1..=self.max_iterations {
            debug!(
                "Agent iteration {}/{} for thread {}",
                iteration, self.max_iterations, thread_id
            );

            let mut messages = Vec::with_capacity(1 + history.len() + transcript.len());
            messages.push(ChatMessage::System(system_prompt.to_string()));
            messages.extend(history.iter().cloned());
            messages.extend(transcript.iter().cloned());

            let mut deltas = self.model.stream(messages, self.tools.definitions()).await?;

            let mut text = String::new();
            let mut pending: BTreeMap<u32, PendingToolCall> = BTreeMap::new();

            while let Some(delta) = deltas.next().await {
                match delta? {
                    ModelDelta::Text(chunk) => {
                        text.push_str(&chunk);
                        if tx.send(Ok(chunk)).await.is_err() {
                            transcript.push(ChatMessage::Assistant {
                                content: Some(text),
                                tool_calls: Vec::new(),
                            });
                            return Ok(RunOutcome::ClientGone);
                        }
                    }
                    ModelDelta::ToolCallChunk {
                        index,
                        id,
                        name,
                        arguments,
                    } => {
                        let entry = pending.entry(index).or_default();
                        if let Some(id) = id.filter(|id| !id.is_empty()) {
                            entry.id = id;
                        }
                        if let Some(name) = name {
                            entry.name.push_str(&name);
                        }
                        if let Some(arguments) = arguments {
                            entry.arguments.push_str(&arguments);
                        }
                    }
                }
            }

            let tool_calls: Vec<ToolCall> = pending
                .into_values()
                .filter_map(|call| {
                    let call = call.into_call();
                    if call.is_none() {
                        warn!("Dropping streamed tool call without a name");
                    }
                    call
                })
                .collect();
            let content = (!text.is_empty()).then_some(text);

            if tool_calls.is_empty() {
                // Assistant turns without tool calls must carry content
                transcript.push(ChatMessage::Assistant {
                    content: Some(content.unwrap_or_default()),
                    tool_calls,
                });
                return Ok(RunOutcome::Finished);
            }

            transcript.push(ChatMessage::Assistant {
                content,
                tool_calls: tool_calls.clone(),
            });

            for call in &tool_calls {
                let result = self.tools.execute(call, thread_id).await;
                if result.is_error {
                    warn!("Tool {} returned an error: {}", result.tool_name, result.content);
                }
                transcript.push(ChatMessage::Tool {
                    tool_call_id: result.tool_call_id,
                    content: result.content,
                });
            }
        }

        Err(AppError::Internal(format!(
            "Agent exceeded maximum iterations ({})",
            self.max_iterations
        )))
    }
}
