//! OpenAI-compatible chat model built on `async-openai`.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionStreamResponseDelta, ChatCompletionTool, ChatCompletionToolType,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, FunctionCall,
        FunctionObject,
    },
    Client,
};
use async_trait::async_trait;
use futures::{stream, StreamExt};
use tracing::debug;

use super::{ChatMessage, ChatModel, DeltaStream, ModelDelta};
use crate::core::config::LlmConfig;
use crate::core::error::{AppError, Result};
use crate::modules::agent::ToolDefinition;

pub struct OpenAIChatModel {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIChatModel {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key.clone());
        if let Some(base_url) = &config.base_url {
            openai_config = openai_config.with_api_base(base_url.clone());
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Client::with_config(openai_config).with_http_client(http_client),
            model: config.model_name.clone(),
        })
    }

    fn build_request(
        &self,
        messages: Vec<ChatMessage>,
        tools: Vec<ToolDefinition>,
    ) -> Result<CreateChatCompletionRequest> {
        let messages = messages
            .into_iter()
            .map(to_request_message)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(build_error)?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model).messages(messages);

        // An empty tools array is rejected by the API
        if !tools.is_empty() {
            args.tools(tools.into_iter().map(to_chat_tool).collect::<Vec<_>>());
        }

        args.build().map_err(build_error)
    }
}

fn build_error(e: OpenAIError) -> AppError {
    AppError::Internal(format!("Failed to build model request: {}", e))
}

fn to_request_message(
    message: ChatMessage,
) -> std::result::Result<ChatCompletionRequestMessage, OpenAIError> {
    let message = match message {
        ChatMessage::System(content) => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        ChatMessage::User(content) => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        ChatMessage::Assistant {
            content,
            tool_calls,
        } => {
            let mut args = ChatCompletionRequestAssistantMessageArgs::default();
            if let Some(content) = content {
                args.content(content);
            }
            if !tool_calls.is_empty() {
                args.tool_calls(
                    tool_calls
                        .into_iter()
                        .map(|call| ChatCompletionMessageToolCall {
                            id: call.id,
                            r#type: ChatCompletionToolType::Function,
                            function: FunctionCall {
                                name: call.name,
                                arguments: call.arguments,
                            },
                        })
                        .collect::<Vec<_>>(),
                );
            }
            args.build()?.into()
        }
        ChatMessage::Tool {
            tool_call_id,
            content,
        } => ChatCompletionRequestToolMessageArgs::default()
            .tool_call_id(tool_call_id)
            .content(content)
            .build()?
            .into(),
    };

    Ok(message)
}

fn to_chat_tool(definition: ToolDefinition) -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: definition.name,
            description: Some(definition.description),
            parameters: Some(definition.parameters),
            strict: None,
        },
    }
}

/// Flatten one streamed delta into text and tool-call fragments
fn to_model_deltas(delta: ChatCompletionStreamResponseDelta) -> Vec<ModelDelta> {
    let mut deltas = Vec::new();

    if let Some(content) = delta.content {
        if !content.is_empty() {
            deltas.push(ModelDelta::Text(content));
        }
    }

    for chunk in delta.tool_calls.unwrap_or_default() {
        let (name, arguments) = match chunk.function {
            Some(function) => (function.name, function.arguments),
            None => (None, None),
        };
        deltas.push(ModelDelta::ToolCallChunk {
            index: chunk.index,
            id: chunk.id,
            name,
            arguments,
        });
    }

    deltas
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = self.build_request(messages, Vec::new())?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Model API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ExternalServiceError("No response from model".to_string()))?;

        Ok(choice.message.content.unwrap_or_default())
    }

    async fn stream(
        &self,
        messages: Vec<ChatMessage>,
        tools: Vec<ToolDefinition>,
    ) -> Result<DeltaStream> {
        debug!(
            "Starting model stream: model={}, messages={}, tools={}",
            self.model,
            messages.len(),
            tools.len()
        );
        let request = self.build_request(messages, tools)?;

        let response_stream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Model API error: {}", e)))?;

        let deltas = response_stream.flat_map(|chunk| {
            let items: Vec<Result<ModelDelta>> = match chunk {
                Ok(response) => response
                    .choices
                    .into_iter()
                    .flat_map(|choice| to_model_deltas(choice.delta))
                    .map(Ok)
                    .collect(),
                Err(e) => vec![Err(AppError::ExternalServiceError(format!(
                    "Model stream failed: {}",
                    e
                )))],
            };
            stream::iter(items)
        });

        Ok(Box::pin(deltas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::llm::ToolCall;
    use std::time::Duration;

    fn model() -> OpenAIChatModel {
        OpenAIChatModel::new(&LlmConfig {
            api_key: "test-key".to_string(),
            base_url: Some("http://localhost:1/v1".to_string()),
            model_name: "gpt-4o-mini".to_string(),
            max_iterations: 10,
            max_history_turns: 20,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_build_request_without_tools_omits_tools() {
        let request = model()
            .build_request(vec![ChatMessage::User("hi".to_string())], Vec::new())
            .unwrap();
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 1);
        assert!(request.tools.is_none());
    }

    #[test]
    fn test_build_request_maps_tool_exchange() {
        let messages = vec![
            ChatMessage::System("system".to_string()),
            ChatMessage::User("what are my exams?".to_string()),
            ChatMessage::Assistant {
                content: None,
                tool_calls: vec![ToolCall {
                    id: "call_1".to_string(),
                    name: "get_exam_schedule".to_string(),
                    arguments: r#"{"user_id":10,"user_role":"student"}"#.to_string(),
                }],
            },
            ChatMessage::Tool {
                tool_call_id: "call_1".to_string(),
                content: r#"{"exams":[],"error":null}"#.to_string(),
            },
        ];
        let tools = vec![ToolDefinition::builder("get_exam_schedule")
            .description("exams")
            .integer_param("user_id", "id")
            .build()];

        let request = model().build_request(messages, tools).unwrap();
        assert_eq!(request.messages.len(), 4);
        assert!(matches!(
            request.messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
        assert!(matches!(
            request.messages[3],
            ChatCompletionRequestMessage::Tool(_)
        ));
        assert_eq!(request.tools.as_ref().map(|t| t.len()), Some(1));
    }
}
