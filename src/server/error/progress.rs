use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Duration;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    /// Daily bonus requested before the 24 hour cooldown elapsed.
    ///
    /// Recovered by telling the member how long is left. Results in 409 Conflict on the
    /// dashboard.
    #[error("Daily bonus already claimed, next claim in {}", format_remaining(remaining))]
    AlreadyClaimed {
        /// Time until the next claim is possible.
        remaining: Duration,
    },

    /// Negative XP amount requested.
    ///
    /// Internal callers only ever pass unsigned amounts; this is raised for external input.
    /// Results in 400 Bad Request.
    #[error("XP amount must not be negative, got {0}")]
    InvalidAmount(i64),
}

/// Formats a cooldown as `Xh Ym`.
pub fn format_remaining(remaining: &Duration) -> String {
    let total_minutes = remaining.num_minutes().max(0);
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

impl IntoResponse for ProgressError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::AlreadyClaimed { .. } => StatusCode::CONFLICT,
            Self::InvalidAmount(_) => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_remaining_as_hours_and_minutes() {
        assert_eq!(format_remaining(&Duration::minutes(125)), "2h 5m");
        assert_eq!(format_remaining(&Duration::seconds(59)), "0h 0m");
        assert_eq!(format_remaining(&Duration::minutes(-5)), "0h 0m");
    }
}
