use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The request carried no `Authorization: Bearer` header.
    #[error("Missing bearer token")]
    MissingToken,

    /// The bearer token does not match the configured dashboard token.
    #[error("Invalid bearer token")]
    InvalidToken,

    /// No dashboard token is configured, so the dashboard is closed.
    #[error("Dashboard access is disabled")]
    DashboardDisabled,
}

/// Converts authentication errors into HTTP responses.
///
/// Every variant maps to 401 Unauthorized with the same generic message; the specific reason
/// is logged at debug level only.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("Dashboard authentication failed: {}", self);

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: "Unauthorized".to_string(),
            }),
        )
            .into_response()
    }
}
