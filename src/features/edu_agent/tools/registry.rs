use std::sync::Arc;

use serde_json::Value;

use super::definitions::{
    get_all_class_information_of_user_tool, get_all_material_info_of_class_tool,
    get_exam_schedule_tool, summary_file_tool,
};
use super::handlers::{
    handle_get_all_class_information, handle_get_all_material_info, handle_get_exam_schedule,
    handle_summary_file,
};
use crate::features::edu_agent::clients::BackendClient;
use crate::features::edu_agent::services::SummaryService;
use crate::modules::agent::{FnToolExecutor, ToolContext, ToolRegistry};

/// Create a tool registry with all EduAssist tools
pub fn create_tool_registry(
    backend: Arc<BackendClient>,
    summary_service: Arc<SummaryService>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(FnToolExecutor::new(
        summary_file_tool(),
        move |args: Value, ctx: ToolContext| {
            let summary_service = Arc::clone(&summary_service);
            async move { handle_summary_file(args, ctx, &summary_service).await }
        },
    ));

    let backend_clone = Arc::clone(&backend);
    registry.register(FnToolExecutor::new(
        get_exam_schedule_tool(),
        move |args: Value, ctx: ToolContext| {
            let backend = Arc::clone(&backend_clone);
            async move { handle_get_exam_schedule(args, ctx, &backend).await }
        },
    ));

    let backend_clone = Arc::clone(&backend);
    registry.register(FnToolExecutor::new(
        get_all_class_information_of_user_tool(),
        move |args: Value, ctx: ToolContext| {
            let backend = Arc::clone(&backend_clone);
            async move { handle_get_all_class_information(args, ctx, &backend).await }
        },
    ));

    registry.register(FnToolExecutor::new(
        get_all_material_info_of_class_tool(),
        move |args: Value, ctx: ToolContext| {
            let backend = Arc::clone(&backend);
            async move { handle_get_all_material_info(args, ctx, &backend).await }
        },
    ));

    registry
}
