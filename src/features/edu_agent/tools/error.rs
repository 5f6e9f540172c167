use thiserror::Error;

use crate::modules::documents::DocumentError;

/// Failure of a tool call. Rendered into the envelope `error` field, never
/// returned to the agent loop as an error.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Backend rejected the request; carries its message verbatim
    #[error("{0}")]
    Backend(String),

    #[error("Failed to reach backend: {0}")]
    Transport(String),

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model error: {0}")]
    Model(String),
}
