use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use test_utils::{builder::TestBuilder, factory};
use tower::ServiceExt;

use crate::{
    model::{
        api::{ErrorDto, HealthDto},
        progress::{GrantXpResultDto, LeaderboardEntryDto, UserProgressDto},
        settings::GuildSettingsDto,
    },
    server::{
        progression::{catalog::GameCatalog, rules::ProgressionRules},
        router::router,
        state::AppState,
    },
};

mod progress;

const TOKEN: &str = "dashboard-token";

fn app(db: &DatabaseConnection) -> Router {
    let state = AppState::new(
        db.clone(),
        GameCatalog::default(),
        ProgressionRules::default(),
        Some(TOKEN.to_string()),
    );
    router(state, &["*".to_string()])
}

fn request(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body)
}

fn json<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap()
}
