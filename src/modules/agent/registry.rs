use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::tool::{ToolContext, ToolDefinition, ToolExecutor, ToolResult};
use crate::modules::llm::ToolCall;

/// Ordered set of tools exposed to the agent
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolExecutor>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any previous tool with the same name
    pub fn register(&mut self, executor: impl ToolExecutor + 'static) {
        let name = executor.definition().name.clone();
        self.tools.retain(|t| t.definition().name != name);
        self.tools.push(Arc::new(executor));
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .map(|t| t.definition().name.as_str())
            .collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition().clone()).collect()
    }

    /// Run one model-requested tool call. Never fails: unknown tools come back
    /// as error results for the model to read. Arguments that are not valid
    /// JSON reach the tool as the raw string.
    pub async fn execute(&self, call: &ToolCall, thread_id: &str) -> ToolResult {
        let Some(tool) = self.tools.iter().find(|t| t.definition().name == call.name) else {
            warn!("Model requested unknown tool: {}", call.name);
            return ToolResult::error(&call.id, &call.name, format!("Unknown tool: {}", call.name));
        };

        let args: Value = if call.arguments.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            match serde_json::from_str(&call.arguments) {
                Ok(args) => args,
                Err(e) => {
                    // The tool reports the decode failure in its own output shape
                    debug!("Malformed arguments for tool {}: {}", call.name, e);
                    Value::String(call.arguments.clone())
                }
            }
        };

        info!(
            "Executing tool: name={}, call_id={}, thread={}",
            call.name, call.id, thread_id
        );

        let ctx = ToolContext {
            thread_id: thread_id.to_string(),
            tool_call_id: call.id.clone(),
            tool_name: call.name.clone(),
        };

        tool.execute(args, ctx).await
    }
}
