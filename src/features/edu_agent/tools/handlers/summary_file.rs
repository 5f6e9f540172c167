use serde_json::Value;

use super::{envelope_result, parse_input};
use crate::features::edu_agent::dtos::{SummaryFileInput, SummaryFileOutput};
use crate::features::edu_agent::services::SummaryService;
use crate::features::edu_agent::tools::ToolError;
use crate::modules::agent::{ToolContext, ToolResult};

/// Handle the `summary_file` tool call
pub async fn handle_summary_file(
    args: Value,
    ctx: ToolContext,
    summary_service: &SummaryService,
) -> ToolResult {
    let output = SummaryFileOutput::from(summary_file(args, summary_service).await);
    envelope_result(&ctx, &output)
}

async fn summary_file(args: Value, summary_service: &SummaryService) -> Result<String, ToolError> {
    let input: SummaryFileInput = parse_input(args)?;
    summary_service.summarize_file(&input.file_name).await
}
