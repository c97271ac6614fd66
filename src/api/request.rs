//! API request helpers

use axum::extract::FromRequest;
use axum::extract::Json;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;
use url::Url;

use super::Error;

/// Parse and normalize an alias
///
/// Leading and trailing slashes are removed; characters that would change
/// the meaning of a request path are rejected
pub fn parse_alias(alias: &str) -> Result<String, Error> {
    let alias = alias.trim_matches('/');

    for ch in alias.chars() {
        if ch == '?' {
            return Err(Error::bad_request(r#"Alias can not contain "?""#));
        }

        if ch == '#' {
            return Err(Error::bad_request(r##"Alias can not contain "#""##));
        }
    }

    Ok(alias.to_string())
}

/// Parse and validate a URL
pub fn parse_url<I>(url: I) -> Result<Url, Error>
where
    I: AsRef<str>,
{
    Url::parse(url.as_ref()).map_err(Error::bad_request)
}

fn parse_json<J>(json: Result<Json<J>, JsonRejection>) -> Result<J, Error> {
    match json {
        Ok(Json(json)) => Ok(json),
        Err(err) => match err {
            JsonRejection::JsonDataError(err) => {
                Err(Error::bad_request("Data error").with_description(err))
            }
            JsonRejection::JsonSyntaxError(err) => {
                Err(Error::bad_request("JSON syntax error").with_description(err))
            }
            JsonRejection::MissingJsonContentType(_err) => Err(Error::bad_request(
                "Missing `application/json` content type",
            )),
            JsonRejection::BytesRejection(err) => {
                Err(Error::bad_request("Invalid characters in JSON").with_description(err))
            }
            err => Err(Error::bad_request("Unknown JSON error").with_description(err)),
        },
    }
}

/// Wrapper for the JSON extractor
pub struct Form<F>(pub F);

impl<S, F> FromRequest<S> for Form<F>
where
    S: Send + Sync,
    F: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = Json::<F>::from_request(req, state).await;

        parse_json(json).map(Form)
    }
}
