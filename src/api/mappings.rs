//! Mappings API endpoints
//!
//! Everything related to the management of alias/target mappings

use axum::Extension;
use axum::extract::Path;
use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::alias;
use crate::storage;
use crate::storage::Storage;

use super::Error;
use super::Form;
use super::Success;
use super::parse_alias;
use super::parse_url;

/// Mapping response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingResponse {
    /// Surrogate ID assigned by storage
    pub id: i64,

    /// Alias the mapping is reachable under
    pub alias: String,

    /// Url the alias redirects to
    pub url: String,
}

/// Create mapping form
///
/// Fields to create a mapping with
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMappingForm {
    /// Url to shorten
    url: String,

    /// Alias to shorten the URL to
    ///
    /// A random alias is generated when missing or empty
    alias: Option<String>,
}

/// Create a mapping based on the [`CreateMappingForm`](CreateMappingForm) form
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "url": "https://www.example.com/", "alias": "example" }' \
///     http://localhost:7000/api/mappings
/// ```
///
/// Response
/// ```json
/// { "data": { "id": 1, "alias": "example", "url": "https://www.example.com/" } }
/// ```
pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<CreateMappingForm>,
) -> Result<Success<MappingResponse>, Error> {
    let url = parse_url(&form.url)?;

    let custom_alias = match form.alias.as_deref() {
        Some(alias) if !alias.is_empty() => Some(parse_alias(alias)?),
        _ => None,
    };

    let (id, alias) = if let Some(alias) = custom_alias {
        let id = storage
            .save(&url, &alias)
            .await
            .map_err(Error::from_storage)?;

        (id, alias)
    } else {
        save_with_generated_alias(&storage, &url).await?
    };

    Ok(Success::created(MappingResponse {
        id,
        alias,
        url: url.to_string(),
    }))
}

/// Save under a freshly generated alias
///
/// Generated aliases are short, so collisions with existing mappings do
/// happen; a new alias is drawn for every attempt, up to
/// [`alias::MAX_GENERATE_ATTEMPTS`] in total
async fn save_with_generated_alias<S: Storage>(
    storage: &S,
    url: &Url,
) -> Result<(i64, String), Error> {
    let mut attempts = 1;

    loop {
        let alias = alias::generate(alias::DEFAULT_LENGTH);

        match storage.save(url, &alias).await {
            Ok(id) => return Ok((id, alias)),
            Err(storage::Error::AlreadyExists) if attempts < alias::MAX_GENERATE_ATTEMPTS => {
                tracing::debug!(r#"Generated alias "{alias}" is taken, retrying"#);

                attempts += 1;
            }
            Err(err) => return Err(Error::from_storage(err)),
        }
    }
}

/// Rename mapping form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameMappingForm {
    /// Alias the mapping should move to
    new_alias: String,
}

/// Rename response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameResponse {
    /// Alias the mapping is now reachable under
    pub alias: String,
}

/// Move a mapping to a new alias based on the
/// [`RenameMappingForm`](RenameMappingForm) form
///
/// The shape checks on the new alias are owned by this handler, the storage
/// contract only guards uniqueness
///
/// Request:
/// ```sh
/// curl -v -XPATCH -H 'Content-Type: application/json' \
///     -d '{ "newAlias": "better-name" }' \
///     http://localhost:7000/api/mappings/example
/// ```
///
/// Response
/// ```json
/// { "data": { "alias": "better-name" } }
/// ```
pub async fn rename<S: Storage>(
    Extension(storage): Extension<S>,
    Path(old_alias): Path<String>,
    Form(form): Form<RenameMappingForm>,
) -> Result<Success<RenameResponse>, Error> {
    let new_alias = parse_alias(&form.new_alias)?;

    if new_alias.is_empty() {
        return Err(Error::bad_request("New alias can not be empty"));
    }

    if new_alias.len() < alias::DEFAULT_LENGTH {
        return Err(Error::bad_request("New alias is too short"));
    }

    if new_alias == old_alias {
        return Err(Error::bad_request("New alias is the same as the old one"));
    }

    storage
        .rename(&old_alias, &new_alias)
        .await
        .map_err(Error::from_storage)?;

    Ok(Success::ok(RenameResponse { alias: new_alias }))
}

/// Delete a mapping
///
/// Deleting an alias that does not exist is not an error
///
/// Request:
/// ```sh
/// curl -v -XDELETE http://localhost:7000/api/mappings/example
/// ```
pub async fn delete<S: Storage>(
    Extension(storage): Extension<S>,
    Path(alias): Path<String>,
) -> Result<Success<&'static str>, Error> {
    storage.delete(&alias).await.map_err(Error::from_storage)?;

    Ok(Success::<&'static str>::no_content())
}
