use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::{config::startup::AppState, error::AppError};

/// Compares SHA-256 digests in constant time, so neither the contents nor
/// the length of the expected token leak through response timing.
fn token_matches(provided: &str, expected: &str) -> bool {
    let provided = Sha256::digest(provided.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    provided.ct_eq(&expected).into()
}

/// Lets a request through only when it carries `Authorization: Bearer <ADMIN_TOKEN>`.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let app_state = req
        .extensions()
        .get::<AppState>()
        .ok_or(AppError::Unknown)?;

    let authorized = match (
        app_state.admin_token.as_deref(),
        req.headers().typed_get::<Authorization<Bearer>>(),
    ) {
        (Some(expected), Some(Authorization(bearer))) => token_matches(bearer.token(), expected),
        _ => false,
    };

    if !authorized {
        warn!("Rejected admin request to {}", req.uri().path());
        return Err(AppError::AuthenticationFailed);
    }
    Ok(next.run(req).await)
}
