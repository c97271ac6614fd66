#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::net::SocketAddr;

use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::middleware;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::ApiToken;
use crate::storage::Storage;

mod alias;
mod api;
mod graceful_shutdown;
mod mappings;
mod root;
mod storage;
#[cfg(test)]
mod tests;
mod utils;

const DEFAULT_RUST_LOG: &str = "snip=debug,tower_http=debug";
const DEFAULT_ADDRESS: &str = "0.0.0.0:7000";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let app = setup_app().await?;

    let address = setup_address()?;
    tracing::info!("Listening on {}", address);

    let listener = TcpListener::bind(address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// # Errors
///
/// Will return `Err` when the storage can not be reached
async fn setup_app() -> Result<Router> {
    let storage = storage::setup().await?;

    Ok(create_router(storage, setup_api_token()))
}

/// Create the router for Snip
///
/// The token check is only layered over the API routes when a token is
/// configured, the redirect route is always public
fn create_router<S: Storage>(storage: S, api_token: Option<String>) -> Router {
    let api = match api_token {
        Some(token) => api::router::<S>().layer(middleware::from_fn_with_state(
            ApiToken(token),
            api::require_token,
        )),
        None => api::router::<S>(),
    };

    Router::new()
        .nest("/api", api)
        .fallback(get(root::root::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(storage))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}

fn setup_api_token() -> Option<String> {
    std::env::var("API_TOKEN").ok().filter(|token| !token.is_empty())
}

fn setup_address() -> Result<SocketAddr> {
    let mut address = utils::env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS))
        .parse::<SocketAddr>()?;

    // optional override of just the port
    if let Ok(port) = std::env::var("PORT") {
        // only check non-empty strings
        if !port.is_empty() {
            let port = port.parse::<u16>()?;

            address.set_port(port);
        }
    }

    Ok(address)
}
