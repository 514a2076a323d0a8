//! Port for the relational table behind the recency store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::RecentSearch;

use super::define_port_error;

/// A recent search together with its insertion sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecentSearch {
    /// Monotonic insertion sequence; breaks ties between equal timestamps.
    pub id: i64,
    pub entry: RecentSearch,
}

/// Position in the `(updated_at desc, id desc)` order.
///
/// Rows strictly after the boundary in that order are older than it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyBoundary {
    pub updated_at: DateTime<Utc>,
    pub id: i64,
}

impl From<&StoredRecentSearch> for RecencyBoundary {
    fn from(value: &StoredRecentSearch) -> Self {
        Self {
            updated_at: value.entry.updated_at,
            id: value.id,
        }
    }
}

define_port_error! {
    /// Errors raised by recent-search table adapters.
    pub enum RecentSearchesDaoError {
        /// Database connection could not be established.
        Connection { message: String } =>
            "recent searches connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recent searches query failed: {message}",
    }
}

/// Row-level access to the recent-search table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecentSearchesDao: Send + Sync {
    /// Insert one entry.
    async fn insert(&self, entry: &RecentSearch) -> Result<(), RecentSearchesDaoError>;

    /// Every row ordered by `(updated_at desc, id desc)`.
    async fn list_newest_first(&self) -> Result<Vec<StoredRecentSearch>, RecentSearchesDaoError>;

    /// Delete rows older than `boundary`, excluding the boundary row itself.
    async fn delete_older_than(
        &self,
        boundary: &RecencyBoundary,
    ) -> Result<usize, RecentSearchesDaoError>;

    /// Delete every row.
    async fn delete_all(&self) -> Result<usize, RecentSearchesDaoError>;
}
