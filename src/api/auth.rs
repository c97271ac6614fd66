//! API token check
//!
//! A single shared secret for all API access; anything more elaborate is the
//! job of whatever sits in front of this service

use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::Error;

/// The configured shared secret
#[derive(Clone)]
pub struct ApiToken(pub String);

/// Require every request to carry the configured token, verbatim, in the
/// `Authorization` header
pub async fn require_token(
    State(ApiToken(token)): State<ApiToken>,
    request: Request,
    next: Next,
) -> Result<Response, Error> {
    let provided = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if provided == Some(token.as_str()) {
        Ok(next.run(request).await)
    } else {
        Err(Error::unauthorized(
            "Invalid or missing authorization header",
        ))
    }
}
