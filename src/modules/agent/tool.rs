use std::future::Future;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Name, description and JSON-schema parameters of a tool the model may call
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn builder(name: impl Into<String>) -> ToolDefinitionBuilder {
        ToolDefinitionBuilder {
            name: name.into(),
            description: String::new(),
            properties: Map::new(),
            required: Vec::new(),
        }
    }
}

/// Builder for [`ToolDefinition`]; every declared parameter is required
pub struct ToolDefinitionBuilder {
    name: String,
    description: String,
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl ToolDefinitionBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn string_param(self, name: &str, description: &str) -> Self {
        self.param(name, json!({ "type": "string", "description": description }))
    }

    pub fn integer_param(self, name: &str, description: &str) -> Self {
        self.param(name, json!({ "type": "integer", "description": description }))
    }

    pub fn enum_param(self, name: &str, description: &str, values: &[&str]) -> Self {
        self.param(
            name,
            json!({ "type": "string", "description": description, "enum": values }),
        )
    }

    fn param(mut self, name: &str, schema: Value) -> Self {
        self.properties.insert(name.to_string(), schema);
        self.required.push(name.to_string());
        self
    }

    pub fn build(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name,
            description: self.description,
            parameters: json!({
                "type": "object",
                "properties": self.properties,
                "required": self.required,
            }),
        }
    }
}

/// Per-invocation information handed to a tool executor
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub thread_id: String,
    pub tool_call_id: String,
    pub tool_name: String,
}

/// Output of a tool invocation, fed back to the model as a tool message
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub tool_name: String,
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success_json<T: Serialize>(tool_call_id: &str, tool_name: &str, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(content) => Self {
                tool_call_id: tool_call_id.to_string(),
                tool_name: tool_name.to_string(),
                content,
                is_error: false,
            },
            Err(e) => Self::error(
                tool_call_id,
                tool_name,
                format!("Failed to serialize tool output: {}", e),
            ),
        }
    }

    /// Error content is still JSON so the model sees the same `error` key as in tool envelopes
    pub fn error(tool_call_id: &str, tool_name: &str, message: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.to_string(),
            tool_name: tool_name.to_string(),
            content: json!({ "error": message.into() }).to_string(),
            is_error: true,
        }
    }
}

#[async_trait]
pub trait ToolExecutor: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    /// `args` is the decoded argument object, or a JSON string holding the
    /// raw text when the model sent arguments that do not parse.
    async fn execute(&self, args: Value, ctx: ToolContext) -> ToolResult;
}

/// Adapts an async closure into a [`ToolExecutor`]
pub struct FnToolExecutor<F> {
    definition: ToolDefinition,
    handler: F,
}

impl<F> FnToolExecutor<F> {
    pub fn new(definition: ToolDefinition, handler: F) -> Self {
        Self {
            definition,
            handler,
        }
    }
}

#[async_trait]
impl<F, Fut> ToolExecutor for FnToolExecutor<F>
where
    F: Fn(Value, ToolContext) -> Fut + Send + Sync,
    Fut: Future<Output = ToolResult> + Send,
{
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, args: Value, ctx: ToolContext) -> ToolResult {
        (self.handler)(args, ctx).await
    }
}
