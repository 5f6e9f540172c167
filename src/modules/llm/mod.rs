//! Language model access.
//!
//! `ChatModel` is the seam between the agent runtime / summarizer and a
//! concrete provider. Production uses [`OpenAIChatModel`]; tests script
//! responses with `testing::ScriptedModel`.

mod message;
mod openai_client;

pub use message::{ChatMessage, ModelDelta, ToolCall};
pub use openai_client::OpenAIChatModel;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::core::error::Result;
use crate::modules::agent::ToolDefinition;

/// Stream of incremental model output for one turn
pub type DeltaStream = BoxStream<'static, Result<ModelDelta>>;

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run a single non-streaming completion and return its text.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;

    /// Start a streaming completion with the given tools available.
    async fn stream(
        &self,
        messages: Vec<ChatMessage>,
        tools: Vec<ToolDefinition>,
    ) -> Result<DeltaStream>;
}

#[cfg(test)]
pub mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use futures::stream;

    use super::*;
    use crate::core::error::AppError;

    /// A model that replays pre-recorded turns and records what it was sent.
    #[derive(Default)]
    pub struct ScriptedModel {
        turns: Mutex<VecDeque<Vec<Result<ModelDelta>>>>,
        completion: Mutex<Option<std::result::Result<String, String>>>,
        pub streamed: Mutex<Vec<Vec<ChatMessage>>>,
        pub completed: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedModel {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue one streamed turn.
        pub fn with_turn(self, deltas: Vec<ModelDelta>) -> Self {
            self.turns
                .lock()
                .unwrap()
                .push_back(deltas.into_iter().map(Ok).collect());
            self
        }

        /// Queue a turn that fails after emitting `deltas`.
        pub fn with_failing_turn(self, deltas: Vec<ModelDelta>, error: &str) -> Self {
            let mut items: Vec<Result<ModelDelta>> = deltas.into_iter().map(Ok).collect();
            items.push(Err(AppError::ExternalServiceError(error.to_string())));
            self.turns.lock().unwrap().push_back(items);
            self
        }

        pub fn with_completion(self, text: &str) -> Self {
            *self.completion.lock().unwrap() = Some(Ok(text.to_string()));
            self
        }

        pub fn with_failing_completion(self, error: &str) -> Self {
            *self.completion.lock().unwrap() = Some(Err(error.to_string()));
            self
        }
    }

    pub fn text(chunk: &str) -> ModelDelta {
        ModelDelta::Text(chunk.to_string())
    }

    pub fn tool_call(index: u32, id: &str, name: &str, arguments: &str) -> ModelDelta {
        ModelDelta::ToolCallChunk {
            index,
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            arguments: Some(arguments.to_string()),
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
            self.completed.lock().unwrap().push(messages);
            match self.completion.lock().unwrap().clone() {
                Some(Ok(text)) => Ok(text),
                Some(Err(e)) => Err(AppError::ExternalServiceError(e)),
                None => Err(AppError::ExternalServiceError(
                    "no completion scripted".to_string(),
                )),
            }
        }

        async fn stream(
            &self,
            messages: Vec<ChatMessage>,
            _tools: Vec<ToolDefinition>,
        ) -> Result<DeltaStream> {
            self.streamed.lock().unwrap().push(messages);
            let turn = self
                .turns
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| AppError::ExternalServiceError("no turn scripted".to_string()))?;
            Ok(Box::pin(stream::iter(turn)))
        }
    }
}
