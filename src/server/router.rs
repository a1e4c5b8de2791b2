use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::{
    openapi::{
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
        Components,
    },
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        health::{self, HEALTH_TAG},
        progress::{self, PROGRESS_TAG},
        settings::{self, SETTINGS_TAG},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Questboard dashboard API"),
    modifiers(&BearerAuth),
    tags(
        (name = HEALTH_TAG, description = "Liveness"),
        (name = PROGRESS_TAG, description = "Member progress and leaderboards"),
        (name = SETTINGS_TAG, description = "Per-guild progression settings")
    )
)]
struct ApiDoc;

/// Registers the `bearer` security scheme referenced by the protected endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(Components::default)
            .add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
    }
}

/// Builds the dashboard router with OpenAPI docs at `/api/docs`.
///
/// # Arguments
/// - `state` - Shared application state
/// - `cors_origins` - Allowed origins; `*` allows any
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::health))
        .routes(routes!(progress::get_leaderboard))
        .routes(routes!(progress::get_user_progress))
        .routes(routes!(progress::grant_xp))
        .routes(routes!(settings::get_settings, settings::update_settings))
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
