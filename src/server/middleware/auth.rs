use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::server::error::{auth::AuthError, AppError};

/// Checks the dashboard bearer token of a request.
pub struct AuthGuard<'a> {
    expected: Option<&'a str>,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    /// # Arguments
    /// - `expected` - Configured dashboard token; `None` closes the dashboard
    /// - `headers` - Request headers
    pub fn new(expected: Option<&'a str>, headers: &'a HeaderMap) -> Self {
        Self { expected, headers }
    }

    /// Requires `Authorization: Bearer <token>` matching the configured token.
    ///
    /// # Returns
    /// - `Ok(())` - Token accepted
    /// - `Err(AppError::AuthErr)` - Dashboard disabled, header missing or token wrong
    pub fn require(&self) -> Result<(), AppError> {
        let Some(expected) = self.expected else {
            return Err(AuthError::DashboardDisabled.into());
        };

        let Some(token) = self
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
        else {
            return Err(AuthError::MissingToken.into());
        };

        if !tokens_match(token, expected) {
            return Err(AuthError::InvalidToken.into());
        }

        Ok(())
    }
}

/// Compares without returning early on the first differing byte.
fn tokens_match(given: &str, expected: &str) -> bool {
    given.len() == expected.len()
        && given
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}
