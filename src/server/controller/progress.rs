use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        progress::{GrantXpDto, GrantXpResultDto, LeaderboardEntryDto, UserProgressDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::progress::ProgressService,
        state::AppState,
    },
};

/// Tag for grouping progress endpoints in OpenAPI documentation
pub static PROGRESS_TAG: &str = "progress";

#[derive(Deserialize)]
pub struct LeaderboardParams {
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    10
}

fn service(state: &AppState) -> ProgressService<'_> {
    ProgressService::new(&state.db, &state.catalog, &state.locks, &state.defaults)
}

/// Get the XP leaderboard of a guild.
///
/// Members are ordered by XP, highest first.
///
/// # Arguments
/// - `state` - Application state
/// - `headers` - Request headers carrying the bearer token
/// - `guild_id` - Discord guild ID
/// - `params` - Number of entries, clamped to 1-100
///
/// # Returns
/// - `200 OK` - Leaderboard entries
/// - `401 Unauthorized` - Missing or invalid token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/leaderboard",
    tag = PROGRESS_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("limit" = Option<u64>, Query, description = "Number of entries (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Successfully retrieved leaderboard", body = Vec<LeaderboardEntryDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(state.dashboard_token.as_deref(), &headers).require()?;

    let entries = service(&state).leaderboard(guild_id, params.limit).await?;

    let dtos: Vec<LeaderboardEntryDto> = entries.into_iter().map(|e| e.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get the progress of a member.
///
/// # Returns
/// - `200 OK` - Progress record
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - The member has no progress yet
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/users/{user_id}/progress",
    tag = PROGRESS_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("user_id" = u64, Path, description = "Discord user ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved progress", body = UserProgressDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Member has no progress", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_user_progress(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guild_id, user_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(state.dashboard_token.as_deref(), &headers).require()?;

    let Some(progress) = service(&state).get(guild_id, user_id).await? else {
        return Err(AppError::NotFound(format!(
            "No progress for user {} in guild {}",
            user_id, guild_id
        )));
    };

    Ok((StatusCode::OK, Json(progress.into_dto())))
}

/// Grant XP to a member.
///
/// Applies the same level-up handling as any other XP source. Negative amounts are rejected.
///
/// # Returns
/// - `200 OK` - XP granted
/// - `400 Bad Request` - Negative amount
/// - `401 Unauthorized` - Missing or invalid token
/// - `409 Conflict` - The record kept changing during the update
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/users/{user_id}/xp",
    tag = PROGRESS_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("user_id" = u64, Path, description = "Discord user ID")
    ),
    request_body = GrantXpDto,
    responses(
        (status = 200, description = "Successfully granted XP", body = GrantXpResultDto),
        (status = 400, description = "Negative amount", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 409, description = "Concurrent update conflict", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn grant_xp(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guild_id, user_id)): Path<(u64, u64)>,
    Json(payload): Json<GrantXpDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(state.dashboard_token.as_deref(), &headers).require()?;

    let update = service(&state)
        .grant_xp(guild_id, user_id, payload.amount, Utc::now())
        .await?;

    Ok((
        StatusCode::OK,
        Json(GrantXpResultDto {
            xp: update.progress.xp,
            level: update.progress.level(),
            leveled_up: update.value,
        }),
    ))
}
