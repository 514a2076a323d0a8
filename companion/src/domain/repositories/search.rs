//! Network search with a per-session memo and the recent-search history.

use std::sync::Arc;

use tracing::debug;

use super::fallback::{AccessPolicy, read_through};
use crate::domain::ports::SearchDataSource;
use crate::domain::{
    GeocodedAddress, Location, Outcome, RecentSearch, SearchSelection, SearchSuggestion,
};

/// Search orchestration over the network, memory and database sources.
pub struct SearchRepository {
    network: Arc<dyn SearchDataSource>,
    memory: Arc<dyn SearchDataSource>,
    database: Arc<dyn SearchDataSource>,
}

impl SearchRepository {
    pub fn new(
        network: Arc<dyn SearchDataSource>,
        memory: Arc<dyn SearchDataSource>,
        database: Arc<dyn SearchDataSource>,
    ) -> Self {
        Self {
            network,
            memory,
            database,
        }
    }

    /// Search stations and places, memoising results per query.
    ///
    /// A blank query yields no suggestions without reaching any medium.
    pub async fn search(
        &self,
        query: &str,
        exact: bool,
        policy: AccessPolicy,
    ) -> Outcome<Vec<SearchSuggestion>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let memo_key = memo_key(query, exact);
        let fetched = read_through(
            policy,
            "search",
            || self.memory.get_cached_search(&memo_key),
            || self.network.search(query, exact),
        )
        .await?;

        if fetched.is_remote() {
            self.memory.set_cached_search(&memo_key, &fetched.value).await;
        }
        debug!(query, results = fetched.value.len(), "search resolved");
        Ok(fetched.value)
    }

    pub async fn reverse_geocode(&self, location: &Location) -> Outcome<GeocodedAddress> {
        self.network.reverse_geocode(location).await
    }

    /// Remember a selection in the recent-search history.
    pub async fn record_selection(&self, selection: &SearchSelection) -> Outcome<()> {
        self.database.record_selection(selection).await
    }

    /// Recent searches, newest first.
    pub async fn recent_searches(&self) -> Outcome<Vec<RecentSearch>> {
        self.database.get_recent_searches().await
    }
}

fn memo_key(query: &str, exact: bool) -> String {
    let mode = if exact { "exact" } else { "fuzzy" };
    format!("{mode}:{}", query.to_lowercase())
}
