use crate::features::edu_agent::models::UserRole;
use crate::modules::agent::ToolDefinition;

pub const SUMMARY_FILE: &str = "summary_file";
pub const GET_EXAM_SCHEDULE: &str = "get_exam_schedule";
pub const GET_ALL_CLASS_INFORMATION_OF_USER: &str = "get_all_class_information_of_user";
pub const GET_ALL_MATERIAL_INFO_OF_CLASS: &str = "get_all_material_info_of_class";

/// Create the `summary_file` tool definition
pub fn summary_file_tool() -> ToolDefinition {
    ToolDefinition::builder(SUMMARY_FILE)
        .description("Use this tool to summarize the content of an uploaded file")
        .string_param(
            "file_name",
            "Name of the file (including its extension) that needs to be summarized",
        )
        .build()
}

/// Create the `get_exam_schedule` tool definition
pub fn get_exam_schedule_tool() -> ToolDefinition {
    ToolDefinition::builder(GET_EXAM_SCHEDULE)
        .description(
            "Use this tool to get the exam schedule (date, start time, end time) \
             as well as exam information of every class of a user",
        )
        .integer_param("user_id", "Id of the user")
        .enum_param("user_role", "Role of the user", &UserRole::VALUES)
        .build()
}

/// Create the `get_all_class_information_of_user` tool definition
pub fn get_all_class_information_of_user_tool() -> ToolDefinition {
    ToolDefinition::builder(GET_ALL_CLASS_INFORMATION_OF_USER)
        .description("Use this tool to get information of all classes of a specific user")
        .integer_param("user_id", "Id of the user")
        .enum_param("user_role", "Role of the user", &UserRole::VALUES)
        .build()
}

/// Create the `get_all_material_info_of_class` tool definition
pub fn get_all_material_info_of_class_tool() -> ToolDefinition {
    ToolDefinition::builder(GET_ALL_MATERIAL_INFO_OF_CLASS)
        .description("Use this tool to get information of all materials of a specific class")
        .integer_param("class_id", "Id of the class")
        .build()
}
