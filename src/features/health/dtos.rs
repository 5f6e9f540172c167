use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponseDto {
    #[schema(example = "OK")]
    pub status: String,
    /// Local server time, ISO-8601 without offset
    #[schema(example = "2025-01-10T08:30:00.123456")]
    pub timestamp: String,
}
