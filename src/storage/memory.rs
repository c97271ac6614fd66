//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use url::Url;

use crate::mappings::Mapping;

use super::Error;
use super::Result;
use super::Storage;

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug, Default)]
pub struct Memory {
    inner: Arc<Mutex<Inner>>,
}

/// The actual state, everything behind one lock so every operation is
/// atomic with respect to readers
#[derive(Debug, Default)]
struct Inner {
    /// All mappings in storage, keyed by surrogate ID
    mappings: HashMap<i64, Mapping>,

    /// Last assigned surrogate ID, never decreases and never reused
    last_id: i64,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for Memory {
    async fn save(&self, target: &Url, alias: &str) -> Result<i64> {
        let mut inner = self.inner.lock().await;

        if inner.mappings.values().any(|mapping| mapping.alias == alias) {
            return Err(Error::AlreadyExists);
        }

        inner.last_id += 1;
        let id = inner.last_id;

        let now = Utc::now();
        let mapping = Mapping {
            id,
            alias: alias.to_string(),
            target: target.to_string(),
            created_at: now,
            updated_at: now,
        };

        inner.mappings.insert(id, mapping);

        Ok(id)
    }

    async fn resolve(&self, alias: &str) -> Result<String> {
        self.inner
            .lock()
            .await
            .mappings
            .values()
            .find(|mapping| mapping.alias == alias)
            .map(|mapping| mapping.target.clone())
            .ok_or(Error::NotFound)
    }

    async fn rename(&self, old_alias: &str, new_alias: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;

        if inner
            .mappings
            .values()
            .any(|mapping| mapping.alias == new_alias)
        {
            return Err(Error::AlreadyExists);
        }

        let mapping = inner
            .mappings
            .values_mut()
            .find(|mapping| mapping.alias == old_alias)
            .ok_or(Error::NotFound)?;

        mapping.alias = new_alias.to_string();
        mapping.updated_at = Utc::now();

        Ok(())
    }

    async fn delete(&self, alias: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;

        inner.mappings.retain(|_, mapping| mapping.alias != alias);

        Ok(())
    }
}
