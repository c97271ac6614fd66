//! The root!
//!
//! The most important part of Snip, the actual redirect logic

use std::str::Utf8Error;

use axum::Extension;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::http::header::LOCATION;
use percent_encoding::percent_decode_str;

use crate::storage;
use crate::storage::Storage;

/// The root!
///
/// All wildcard requests end up in this function.
///
/// The path is used as alias for a lookup in storage; a hit answers with a
/// temporary redirect so clients do not cache a mapping that can still be
/// renamed or deleted
pub async fn root<S: Storage>(
    Extension(storage): Extension<S>,
    uri: Uri,
) -> Result<(StatusCode, HeaderMap), (StatusCode, String)> {
    let alias = uri.path().trim_matches('/');
    let alias = url_decode_alias(alias).map_err(internal_error)?;

    tracing::debug!("Looking for alias: /{alias}");

    let mut headers = HeaderMap::new();

    let status_code = match storage.resolve(&alias).await {
        Ok(target) => {
            tracing::debug!(r#"Alias "{alias}" redirecting to: {target}"#);

            let target = HeaderValue::from_str(&target).map_err(internal_error)?;
            headers.insert(LOCATION, target);

            StatusCode::TEMPORARY_REDIRECT
        }
        Err(storage::Error::NotFound) => {
            tracing::debug!(r#"Alias "{alias}" not found"#);

            StatusCode::NOT_FOUND
        }
        Err(err) => {
            tracing::error!(r#"Failed to resolve alias "{alias}": {err}"#);

            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Internal error"),
            ));
        }
    };

    Ok((status_code, headers))
}

/// Utility function for mapping any error into a `500 Internal Server Error`
/// response.
fn internal_error<E>(err: E) -> (StatusCode, String)
where
    E: std::error::Error,
{
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

/// URL decode alias
///
/// Uses percentage encoding for the decoding, might error in case of invalid
/// UTF-8
fn url_decode_alias(alias: &str) -> Result<String, Utf8Error> {
    let decoded = percent_decode_str(alias);

    decoded.decode_utf8().map(|decoded| decoded.to_string())
}
