use axum::{response::IntoResponse, Json};

use crate::model::api::HealthDto;

/// Tag for grouping health endpoints in OpenAPI documentation
pub static HEALTH_TAG: &str = "health";

/// Liveness check. Requires no authentication.
///
/// # Returns
/// - `200 OK` - The server is running
#[utoipa::path(
    get,
    path = "/api/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Server is running", body = HealthDto)
    ),
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthDto {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
