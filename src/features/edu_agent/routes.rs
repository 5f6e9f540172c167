use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use super::handlers::chat_handler::{chat, ChatState};
use super::services::AgentRuntimeService;
use crate::modules::storage::LocalUploadStore;

/// Create routes for the EduAssist chat feature
pub fn routes(
    agent_runtime_service: Arc<AgentRuntimeService>,
    upload_store: LocalUploadStore,
    body_limit: usize,
) -> Router {
    let chat_state = ChatState {
        agent_runtime: agent_runtime_service,
        upload_store,
    };

    Router::new()
        .route(
            "/chat",
            post(chat).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(chat_state)
}
