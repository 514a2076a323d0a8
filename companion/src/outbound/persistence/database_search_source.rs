//! Database-bound search source: the recent-search history.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{Medium, SearchDataSource, unsupported_on};
use crate::domain::{
    GeocodedAddress, Location, Outcome, RecencyStore, RecentSearch, SearchSelection,
    SearchSuggestion,
};

/// Serves `record_selection` and `get_recent_searches` through a shared
/// [`RecencyStore`]; every other search operation aborts.
#[derive(Clone)]
pub struct DatabaseSearchDataSource {
    recents: Arc<RecencyStore>,
}

impl DatabaseSearchDataSource {
    pub fn new(recents: Arc<RecencyStore>) -> Self {
        Self { recents }
    }
}

#[async_trait]
impl SearchDataSource for DatabaseSearchDataSource {
    async fn search(&self, _query: &str, _exact: bool) -> Outcome<Vec<SearchSuggestion>> {
        unsupported_on(Medium::Database, "search")
    }

    async fn reverse_geocode(&self, _location: &Location) -> Outcome<GeocodedAddress> {
        unsupported_on(Medium::Database, "reverse_geocode")
    }

    async fn get_cached_search(&self, _query: &str) -> Outcome<Vec<SearchSuggestion>> {
        unsupported_on(Medium::Database, "get_cached_search")
    }

    async fn set_cached_search(&self, _query: &str, _results: &[SearchSuggestion]) {
        unsupported_on(Medium::Database, "set_cached_search")
    }

    async fn record_selection(&self, selection: &SearchSelection) -> Outcome<()> {
        self.recents.record_selection(selection).await
    }

    async fn get_recent_searches(&self) -> Outcome<Vec<RecentSearch>> {
        self.recents.fetch_all().await
    }
}
