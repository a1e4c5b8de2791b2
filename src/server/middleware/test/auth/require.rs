use super::*;

/// Tests a matching bearer token is accepted.
///
/// Expected: Ok(())
#[test]
fn accepts_matching_token() {
    let headers = headers(Some("Bearer s3cret"));

    let result = AuthGuard::new(Some("s3cret"), &headers).require();

    assert!(result.is_ok());
}

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[test]
fn rejects_missing_header() {
    let headers = headers(None);

    let result = AuthGuard::new(Some("s3cret"), &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
}

/// Tests a non-bearer Authorization scheme.
///
/// Expected: Err(AuthError::MissingToken)
#[test]
fn rejects_other_schemes() {
    let headers = headers(Some("Basic czNjcmV0"));

    let result = AuthGuard::new(Some("s3cret"), &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
}

/// Tests a wrong token, including one that only shares a prefix.
///
/// Expected: Err(AuthError::InvalidToken)
#[test]
fn rejects_wrong_token() {
    for value in ["Bearer wrong", "Bearer s3cre", "Bearer s3cret2"] {
        let headers = headers(Some(value));

        let result = AuthGuard::new(Some("s3cret"), &headers).require();

        assert!(
            matches!(result, Err(AppError::AuthErr(AuthError::InvalidToken))),
            "{}",
            value
        );
    }
}

/// Tests the dashboard stays closed without a configured token.
///
/// Expected: Err(AuthError::DashboardDisabled) even with a header present
#[test]
fn rejects_everything_when_disabled() {
    let headers = headers(Some("Bearer anything"));

    let result = AuthGuard::new(None, &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::DashboardDisabled))
    ));
}
