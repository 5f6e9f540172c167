use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// JSON body for `POST /chat`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ChatRequestDto {
    /// Conversation identifier chosen by the caller; memory is keyed by it
    #[serde(rename = "threadID", default)]
    #[validate(length(min = 1, message = "threadID is required"))]
    pub thread_id: String,

    #[serde(rename = "userMessage", default)]
    #[validate(length(min = 1, message = "userMessage is required"))]
    pub user_message: String,
}

/// Multipart form for `POST /chat`, for Swagger UI documentation only.
/// The handler reads the parts as a stream.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ChatFormDto {
    #[schema(rename = "threadID")]
    pub thread_id: String,

    #[schema(rename = "userMessage")]
    pub user_message: String,

    /// Files to store under the upload directory before the agent runs
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub files: Vec<String>,
}
