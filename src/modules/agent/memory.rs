use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::modules::llm::ChatMessage;

/// In-process conversation store keyed by thread id.
///
/// Volatile: everything is lost on restart. Each thread keeps at most
/// `max_turns` user turns; older turns are dropped whole, together with
/// their assistant replies and tool results.
pub struct ThreadMemory {
    threads: RwLock<HashMap<String, Vec<ChatMessage>>>,
    max_turns: usize,
}

impl Default for ThreadMemory {
    fn default() -> Self {
        Self::with_max_turns(Self::DEFAULT_MAX_TURNS)
    }
}

impl ThreadMemory {
    pub const DEFAULT_MAX_TURNS: usize = 20;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_turns(max_turns: usize) -> Self {
        Self {
            threads: RwLock::new(HashMap::new()),
            max_turns: max_turns.max(1),
        }
    }

    pub async fn history(&self, thread_id: &str) -> Vec<ChatMessage> {
        self.threads
            .read()
            .await
            .get(thread_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn append(&self, thread_id: &str, messages: Vec<ChatMessage>) {
        if messages.is_empty() {
            return;
        }
        let mut threads = self.threads.write().await;
        let history = threads.entry(thread_id.to_string()).or_default();
        history.extend(messages);
        trim_to_turns(history, self.max_turns);
    }
}

/// Drop leading messages so that at most `max_turns` user turns remain.
/// Cuts only at a user message so tool calls stay paired with their results.
fn trim_to_turns(history: &mut Vec<ChatMessage>, max_turns: usize) {
    let turn_starts: Vec<usize> = history
        .iter()
        .enumerate()
        .filter(|(_, message)| matches!(message, ChatMessage::User(_)))
        .map(|(index, _)| index)
        .collect();

    if turn_starts.len() > max_turns {
        let cut = turn_starts[turn_starts.len() - max_turns];
        history.drain(..cut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::llm::ToolCall;

    fn user(text: &str) -> ChatMessage {
        ChatMessage::User(text.to_string())
    }

    fn reply(text: &str) -> ChatMessage {
        ChatMessage::Assistant {
            content: Some(text.to_string()),
            tool_calls: vec![],
        }
    }

    #[tokio::test]
    async fn test_threads_are_isolated() {
        let memory = ThreadMemory::new();
        memory.append("a", vec![user("hello")]).await;
        memory.append("a", vec![user("again")]).await;

        assert_eq!(memory.history("a").await.len(), 2);
        assert!(memory.history("b").await.is_empty());
    }

    #[tokio::test]
    async fn test_oldest_turns_are_dropped_whole() {
        let memory = ThreadMemory::with_max_turns(2);
        memory
            .append(
                "t",
                vec![
                    user("first"),
                    ChatMessage::Assistant {
                        content: None,
                        tool_calls: vec![ToolCall {
                            id: "call_1".to_string(),
                            name: "get_exam_schedule".to_string(),
                            arguments: "{}".to_string(),
                        }],
                    },
                    ChatMessage::Tool {
                        tool_call_id: "call_1".to_string(),
                        content: "{}".to_string(),
                    },
                    reply("one"),
                ],
            )
            .await;
        memory.append("t", vec![user("second"), reply("two")]).await;
        memory.append("t", vec![user("third"), reply("three")]).await;

        assert_eq!(
            memory.history("t").await,
            vec![user("second"), reply("two"), user("third"), reply("three")]
        );
    }

    #[tokio::test]
    async fn test_zero_cap_keeps_latest_turn() {
        let memory = ThreadMemory::with_max_turns(0);
        memory.append("t", vec![user("a"), reply("1")]).await;
        memory.append("t", vec![user("b"), reply("2")]).await;

        assert_eq!(memory.history("t").await, vec![user("b"), reply("2")]);
    }
}
