use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::modules::agent::{AgentRuntime, ThreadMemory, ToolRegistry};
use crate::modules::llm::ChatModel;
use crate::shared::prompts::render_edu_agent_prompt;

/// Service wiring the EduAssist prompt, tools and thread memory into the agent
pub struct AgentRuntimeService {
    runtime: AgentRuntime,
}

impl AgentRuntimeService {
    pub fn new(
        model: Arc<dyn ChatModel>,
        tool_registry: ToolRegistry,
        memory: Arc<ThreadMemory>,
        max_iterations: usize,
    ) -> Self {
        info!(
            "Agent runtime ready with tools: {:?}",
            tool_registry.names()
        );
        Self {
            runtime: AgentRuntime::new(model, tool_registry, memory, max_iterations),
        }
    }

    /// Start answering `user_message` in the given thread.
    ///
    /// Fails only when the system prompt cannot be rendered; later errors
    /// arrive through the returned channel.
    pub fn chat_stream(
        &self,
        thread_id: &str,
        user_message: String,
    ) -> Result<mpsc::Receiver<Result<String>>> {
        let system_prompt = render_edu_agent_prompt()
            .map_err(|e| AppError::Internal(format!("Failed to render system prompt: {}", e)))?;

        info!("Starting chat stream for thread {}", thread_id);
        Ok(self
            .runtime
            .stream(thread_id.to_string(), system_prompt, user_message))
    }
}
