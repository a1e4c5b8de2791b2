use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        settings::{GuildSettingsDto, UpdateGuildSettingsDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::settings::UpdateGuildSettingsParam,
        service::guild_settings::GuildSettingsService, state::AppState,
    },
};

/// Tag for grouping settings endpoints in OpenAPI documentation
pub static SETTINGS_TAG: &str = "settings";

/// Get the progression settings of a guild.
///
/// Guilds that never saved settings get the process defaults without `updated_at`.
///
/// # Returns
/// - `200 OK` - Effective settings
/// - `401 Unauthorized` - Missing or invalid token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/settings",
    tag = SETTINGS_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved settings", body = GuildSettingsDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(state.dashboard_token.as_deref(), &headers).require()?;

    let settings = GuildSettingsService::new(&state.db, &state.defaults)
        .get(guild_id)
        .await?;

    Ok((StatusCode::OK, Json(settings.into_dto())))
}

/// Replace the progression settings of a guild.
///
/// # Returns
/// - `200 OK` - Stored settings
/// - `400 Bad Request` - Zero daily game XP cap
/// - `401 Unauthorized` - Missing or invalid token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/guilds/{guild_id}/settings",
    tag = SETTINGS_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    request_body = UpdateGuildSettingsDto,
    responses(
        (status = 200, description = "Successfully updated settings", body = GuildSettingsDto),
        (status = 400, description = "Invalid settings", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
    Json(payload): Json<UpdateGuildSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(state.dashboard_token.as_deref(), &headers).require()?;

    let param = UpdateGuildSettingsParam::from_dto(guild_id, payload);
    let settings = GuildSettingsService::new(&state.db, &state.defaults)
        .update(param)
        .await?;

    Ok((StatusCode::OK, Json(settings.into_dto())))
}
