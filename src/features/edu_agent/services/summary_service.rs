use std::sync::Arc;

use tracing::{debug, info};

use crate::features::edu_agent::tools::ToolError;
use crate::modules::documents;
use crate::modules::llm::{ChatMessage, ChatModel};
use crate::modules::storage::LocalUploadStore;
use crate::shared::prompts::render_summary_prompt;

/// Summarizes uploaded files with the language model
pub struct SummaryService {
    model: Arc<dyn ChatModel>,
    store: LocalUploadStore,
}

impl SummaryService {
    pub fn new(model: Arc<dyn ChatModel>, store: LocalUploadStore) -> Self {
        Self { model, store }
    }

    /// Summarize the first content unit (first page, first row, or whole
    /// text) of an uploaded file.
    pub async fn summarize_file(&self, file_name: &str) -> Result<String, ToolError> {
        let path = self
            .store
            .resolve(file_name)
            .map_err(|_| ToolError::InvalidFileName(file_name.to_string()))?;

        let content = documents::extract_first_unit(path).await?;
        debug!(
            "Extracted {} characters from {} for summary",
            content.chars().count(),
            file_name
        );

        let prompt = render_summary_prompt(&content).map_err(|e| ToolError::Model(e.to_string()))?;

        let summary = self
            .model
            .complete(vec![ChatMessage::User(prompt)])
            .await
            .map_err(|e| ToolError::Model(e.to_string()))?;

        info!("Summarized file {}", file_name);
        Ok(summary)
    }
}
