use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use super::AppState;
use crate::auth::extract_bearer_token;
use crate::error::ApiError;

/// Reject requests without a valid bearer token. Verified claims are
/// placed in request extensions.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("missing authorization header".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("invalid authorization header".to_string()))?;

    let token = extract_bearer_token(value).ok_or_else(|| {
        ApiError::Unauthorized("authorization header must use the Bearer scheme".to_string())
    })?;

    let claims = state.verifier.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        ApiError::Unauthorized("invalid or expired token".to_string())
    })?;

    tracing::debug!(
        subject = claims.sub.as_deref().unwrap_or("-"),
        path = %request.uri().path(),
        "authenticated request"
    );
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
