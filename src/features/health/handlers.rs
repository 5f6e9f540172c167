use axum::Json;
use chrono::Local;

use super::dtos::HealthResponseDto;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Report that the service is up
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponseDto)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponseDto> {
    Json(HealthResponseDto {
        status: "OK".to_string(),
        timestamp: Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string(),
    })
}
