mod class_info;
mod exam_schedule;
mod material_info;
mod summary_file;

pub use class_info::handle_get_all_class_information;
pub use exam_schedule::handle_get_exam_schedule;
pub use material_info::handle_get_all_material_info;
pub use summary_file::handle_summary_file;

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use super::ToolError;
use crate::features::edu_agent::dtos::ToolEnvelope;
use crate::modules::agent::{ToolContext, ToolResult};

/// Decode and validate tool arguments.
///
/// A string is the raw argument text the registry could not decode (or a
/// double-encoded object); it is parsed here so the failure lands in the
/// tool's envelope.
fn parse_input<T: DeserializeOwned + Validate>(args: Value) -> Result<T, ToolError> {
    let input: T = match args {
        Value::String(raw) => serde_json::from_str(&raw),
        other => serde_json::from_value(other),
    }
    .map_err(|e| ToolError::InvalidInput(e.to_string()))?;
    input
        .validate()
        .map_err(|e| ToolError::InvalidInput(e.to_string()))?;
    Ok(input)
}

/// Serialize an envelope into the tool message for the model
fn envelope_result<E: ToolEnvelope>(ctx: &ToolContext, envelope: &E) -> ToolResult {
    let mut result = ToolResult::success_json(&ctx.tool_call_id, &ctx.tool_name, envelope);
    result.is_error |= envelope.error().is_some();
    result
}
