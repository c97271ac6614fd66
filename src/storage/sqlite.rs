//! `SQLite` storage
//!
//! Embedded storage backed by a single database file

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use url::Url;

use super::Error;
use super::Result;
use super::Storage;

/// `SQLite` storage
///
/// Uniqueness of aliases is enforced by the `UNIQUE` constraint reacting to
/// the write itself; `AUTOINCREMENT` keeps the engine from ever reusing the
/// ID of a deleted row.
#[derive(Clone)]
pub struct Sqlite {
    /// Pool of connections
    connection_pool: SqlitePool,
}

impl Sqlite {
    /// Create `SQLite` storage for a database URL
    ///
    /// The database file is created when missing
    ///
    /// # Errors
    ///
    /// Will return `Err` when the URL is invalid or the file can not be
    /// opened
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(store_failure)?
            .create_if_missing(true);

        let connection_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(store_failure)?;

        Self::with_pool(connection_pool).await
    }

    /// Create `SQLite` storage with an existing pool
    ///
    /// The schema is applied, idempotently, on every call
    ///
    /// # Errors
    ///
    /// Will return `Err` when the schema can not be applied
    pub async fn with_pool(connection_pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS mappings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                alias TEXT NOT NULL UNIQUE,
                target TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&connection_pool)
        .await
        .map_err(store_failure)?;

        Ok(Self { connection_pool })
    }
}

#[async_trait]
impl Storage for Sqlite {
    async fn save(&self, target: &Url, alias: &str) -> Result<i64> {
        let now = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO mappings (alias, target, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(alias)
        .bind(target.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.connection_pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(err) if is_unique_violation(&err) => Err(Error::AlreadyExists),
            Err(err) => Err(store_failure(err)),
        }
    }

    async fn resolve(&self, alias: &str) -> Result<String> {
        let row = sqlx::query(
            r"
            SELECT target
            FROM mappings
            WHERE alias = ?
            LIMIT 1
            ",
        )
        .bind(alias)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(store_failure)?;

        match row {
            Some(row) => row.try_get("target").map_err(store_failure),
            None => Err(Error::NotFound),
        }
    }

    async fn rename(&self, old_alias: &str, new_alias: &str) -> Result<()> {
        let result = sqlx::query(
            r"
            UPDATE mappings
            SET alias = ?, updated_at = ?
            WHERE alias = ?
            ",
        )
        .bind(new_alias)
        .bind(Utc::now())
        .bind(old_alias)
        .execute(&self.connection_pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(Error::NotFound),
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(Error::AlreadyExists),
            Err(err) => Err(store_failure(err)),
        }
    }

    async fn delete(&self, alias: &str) -> Result<()> {
        // affected-row count is deliberately not checked, delete is
        // idempotent
        sqlx::query(
            r"
            DELETE FROM mappings
            WHERE alias = ?
            ",
        )
        .bind(alias)
        .execute(&self.connection_pool)
        .await
        .map_err(store_failure)?;

        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

/// Convert any `SQLx` error into a storage failure
fn store_failure<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::StoreFailure(err.to_string())
}
