//! All API endpoint setup

use axum::Router;
use axum::routing::delete;
use axum::routing::patch;
use axum::routing::post;

pub use auth::ApiToken;
pub use auth::require_token;
pub use request::Form;
pub use request::parse_alias;
pub use request::parse_url;
pub use response::Error;
pub use response::Success;

use crate::storage::Storage;

mod auth;
mod mappings;
mod request;
mod response;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    let mappings = Router::new()
        .route("/", post(mappings::create::<S>))
        .route("/{alias}", patch(mappings::rename::<S>))
        .route("/{alias}", delete(mappings::delete::<S>));

    Router::new().nest("/mappings", mappings)
}
