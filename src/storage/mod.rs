//! All things related to the storage of mappings

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

#[cfg(any(test, not(feature = "sqlite")))]
pub use memory::Memory;
#[cfg(feature = "sqlite")]
pub use sqlite::Sqlite;

#[cfg(any(test, not(feature = "sqlite")))]
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

/// Fallback location of the embedded database
#[cfg(feature = "sqlite")]
const DEFAULT_DATABASE_URL: &str = "sqlite:snip.db";

/// Setup the storage
///
/// # Errors
///
/// Will return `Err` when the database can not be opened
#[cfg(feature = "sqlite")]
pub async fn setup() -> Result<Sqlite> {
    let database_url =
        crate::utils::env_var_or_else("DATABASE_URL", || String::from(DEFAULT_DATABASE_URL));

    Sqlite::connect(&database_url).await
}

/// Setup the storage
#[cfg(not(feature = "sqlite"))]
#[allow(clippy::unused_async)]
pub async fn setup() -> Result<Memory> {
    Ok(Memory::new())
}

/// Storage errors
///
/// `NotFound` and `AlreadyExists` are terminal outcomes for the caller to
/// classify, only `StoreFailure` is a retry candidate
#[derive(Debug, Error)]
pub enum Error {
    /// No live mapping holds the alias
    #[error("alias not found")]
    NotFound,

    /// Another live mapping already holds the alias
    #[error("alias already exists")]
    AlreadyExists,

    /// Any other persistence error, with the engine detail attached
    #[error("storage failure: {0}")]
    StoreFailure(String),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Storage with all supported operations
///
/// Aliases are unique among live mappings at all times; the backing engine
/// enforces this atomically with each write, there is no check-then-act
/// window. Every operation is a single independent transaction.
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Insert a new mapping, returning the assigned surrogate ID
    ///
    /// IDs increase monotonically and are never handed out twice, also not
    /// after the earlier mapping was deleted.
    ///
    /// Fails with [`Error::AlreadyExists`] when the alias is held by a live
    /// mapping
    async fn save(&self, target: &Url, alias: &str) -> Result<i64>;

    /// Look up the target URL for an alias
    ///
    /// Does not mutate state.
    ///
    /// Fails with [`Error::NotFound`] when no live mapping holds the alias
    async fn resolve(&self, alias: &str) -> Result<String>;

    /// Move a mapping from one alias to another
    ///
    /// A single atomic update of the alias column: a concurrent lookup sees
    /// the mapping under the old alias or under the new one, never neither
    /// and never both. Refreshes `updated_at`.
    ///
    /// Fails with [`Error::NotFound`] when the old alias has no live mapping
    /// and with [`Error::AlreadyExists`] when the new alias is taken
    async fn rename(&self, old_alias: &str, new_alias: &str) -> Result<()>;

    /// Remove the mapping for an alias
    ///
    /// Removing an alias that does not exist is not an error
    async fn delete(&self, alias: &str) -> Result<()>;
}
