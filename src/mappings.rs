use chrono::DateTime;
use chrono::Utc;

/// A single alias/target pair, the only persisted entity
#[derive(Clone, Debug)]
#[allow(dead_code)] // only the in-memory backend holds full entities
pub struct Mapping {
    /// Surrogate ID, assigned by storage and never reused
    pub id: i64,

    /// Short key the mapping is reachable under
    pub alias: String,

    /// Url the alias redirects to
    pub target: String,

    /// Creation date
    pub created_at: DateTime<Utc>,

    /// Last updated at, changes on rename
    pub updated_at: DateTime<Utc>,
}
