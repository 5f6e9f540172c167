use serde_json::Value;

use super::{envelope_result, parse_input};
use crate::features::edu_agent::clients::BackendClient;
use crate::features::edu_agent::dtos::{GetAllClassInfoOfOutput, UserInfoInput};
use crate::features::edu_agent::models::ClassInfo;
use crate::features::edu_agent::tools::ToolError;
use crate::modules::agent::{ToolContext, ToolResult};

/// Handle the `get_all_class_information_of_user` tool call
pub async fn handle_get_all_class_information(
    args: Value,
    ctx: ToolContext,
    backend: &BackendClient,
) -> ToolResult {
    let output = GetAllClassInfoOfOutput::from(get_all_class_information(args, backend).await);
    envelope_result(&ctx, &output)
}

async fn get_all_class_information(
    args: Value,
    backend: &BackendClient,
) -> Result<Vec<ClassInfo>, ToolError> {
    let input: UserInfoInput = parse_input(args)?;
    backend.fetch_classes_of(input.user_id, input.user_role).await
}
