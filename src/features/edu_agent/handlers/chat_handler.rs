use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, State},
    http::header,
    response::Response,
};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{debug, info};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::JsonOrMultipart;
use crate::modules::storage::{LocalUploadStore, StorageError};
use crate::shared::constants::FILE_LIST_HEADER;

use super::super::dtos::{ChatFormDto, ChatRequestDto};
use super::super::services::AgentRuntimeService;

/// State for the chat handler
#[derive(Clone)]
pub struct ChatState {
    pub agent_runtime: Arc<AgentRuntimeService>,
    pub upload_store: LocalUploadStore,
}

/// Send a message (optionally with files) and stream the assistant's answer
#[utoipa::path(
    post,
    path = "/chat",
    request_body(content(
        (ChatFormDto = "multipart/form-data"),
        (ChatRequestDto = "application/json")
    )),
    responses(
        (status = 200, description = "Answer streamed as plain text; failures after streaming started appear inline as `Error: <message>`", content_type = "text/plain", body = String),
        (status = 400, description = "Missing threadID or userMessage, invalid file name or malformed body"),
        (status = 500, description = "Uploaded file could not be stored")
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<ChatState>,
    payload: JsonOrMultipart<ChatRequestDto>,
) -> Result<Response> {
    let (dto, file_names) = match payload {
        JsonOrMultipart::Json(dto) => (dto, Vec::new()),
        JsonOrMultipart::Multipart(multipart) => {
            read_chat_form(multipart, &state.upload_store).await?
        }
    };

    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    if !file_names.is_empty() {
        info!(
            "Received {} file(s) for thread {}",
            file_names.len(),
            dto.thread_id
        );
    }

    let message = compose_user_message(dto.user_message, &file_names);
    let rx = state.agent_runtime.chat_stream(&dto.thread_id, message)?;

    let stream = ReceiverStream::new(rx).map(|item| {
        Ok::<_, Infallible>(match item {
            Ok(text) => text,
            Err(e) => format!("Error: {}", e),
        })
    });

    Response::builder()
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}

/// Read the form fields, storing every uploaded file as it streams in
async fn read_chat_form(
    mut multipart: Multipart,
    store: &LocalUploadStore,
) -> Result<(ChatRequestDto, Vec<String>)> {
    let mut dto = ChatRequestDto::default();
    let mut file_names = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "threadID" => dto.thread_id = read_text(field).await?,
            "userMessage" => dto.user_message = read_text(field).await?,
            "files" => {
                let raw_name = field.file_name().unwrap_or("").to_string();
                if raw_name.is_empty() {
                    // Browsers send an empty part when no file was picked
                    debug!("Skipping file part without a name");
                    continue;
                }

                let stored = store
                    .save_stream(&raw_name, Box::pin(field))
                    .await
                    .map_err(|e| match e {
                        StorageError::InvalidFileName(_) => AppError::BadRequest(e.to_string()),
                        other => AppError::Internal(format!(
                            "Failed to upload file {}: {}",
                            raw_name, other
                        )),
                    })?;
                info!("Upload file successfully: {}", stored);
                file_names.push(stored);
            }
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    Ok((dto, file_names))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read form field: {}", e)))
}

/// Append the names of uploaded files so the agent can pass them to `summary_file`
fn compose_user_message(user_message: String, file_names: &[String]) -> String {
    if file_names.is_empty() {
        return user_message;
    }
    format!(
        "{}\n\n{}\n{}",
        user_message,
        FILE_LIST_HEADER,
        file_names.join("\n")
    )
}
