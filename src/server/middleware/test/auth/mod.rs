use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::AuthGuard,
};

mod require;

fn headers(authorization: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(value) = authorization {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    }
    headers
}
