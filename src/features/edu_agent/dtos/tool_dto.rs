//! Tool argument records and the success/error envelopes tools answer with.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::features::edu_agent::models::{ClassInfo, MaterialInfo, UserRole};
use crate::features::edu_agent::tools::ToolError;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserInfoInput {
    pub user_id: i64,
    pub user_role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GetAllMaterialInfoOfClassInput {
    pub class_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SummaryFileInput {
    #[validate(length(min = 1, message = "file_name must not be empty"))]
    pub file_name: String,
}

// ---------------------------------------------------------------------------
// Output envelopes
//
// Fields are private: an envelope can only be built from a `Result`, so
// exactly one of payload and `error` is ever non-null.
// ---------------------------------------------------------------------------

/// Common view over the tool output envelopes
pub trait ToolEnvelope: Serialize {
    fn error(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Serialize)]
pub struct GetAllClassInfoOfOutput {
    class_info_list: Option<Vec<ClassInfo>>,
    error: Option<String>,
}

impl From<Result<Vec<ClassInfo>, ToolError>> for GetAllClassInfoOfOutput {
    fn from(result: Result<Vec<ClassInfo>, ToolError>) -> Self {
        match result {
            Ok(list) => Self {
                class_info_list: Some(list),
                error: None,
            },
            Err(e) => Self {
                class_info_list: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl ToolEnvelope for GetAllClassInfoOfOutput {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExamScheduleOutput {
    exams: Option<Vec<Value>>,
    error: Option<String>,
}

impl From<Result<Vec<Value>, ToolError>> for ExamScheduleOutput {
    fn from(result: Result<Vec<Value>, ToolError>) -> Self {
        match result {
            Ok(exams) => Self {
                exams: Some(exams),
                error: None,
            },
            Err(e) => Self {
                exams: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl ToolEnvelope for ExamScheduleOutput {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetAllMaterialInfoOfClassOutput {
    material_info_list: Option<Vec<MaterialInfo>>,
    error: Option<String>,
}

impl From<Result<Vec<MaterialInfo>, ToolError>> for GetAllMaterialInfoOfClassOutput {
    fn from(result: Result<Vec<MaterialInfo>, ToolError>) -> Self {
        match result {
            Ok(list) => Self {
                material_info_list: Some(list),
                error: None,
            },
            Err(e) => Self {
                material_info_list: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl ToolEnvelope for GetAllMaterialInfoOfClassOutput {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryFileOutput {
    summary_content: Option<String>,
    error: Option<String>,
}

impl From<Result<String, ToolError>> for SummaryFileOutput {
    fn from(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(summary) => Self {
                summary_content: Some(summary),
                error: None,
            },
            Err(e) => Self {
                summary_content: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl ToolEnvelope for SummaryFileOutput {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
