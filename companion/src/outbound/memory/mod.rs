//! Process-local search memo.
//!
//! Results are kept for the lifetime of the source instance, keyed by the
//! query string the repository passes in.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{Medium, SearchDataSource, unsupported_on};
use crate::domain::{
    Failure, GeocodedAddress, Location, Outcome, RecentSearch, SearchSelection, SearchSuggestion,
};

#[derive(Default)]
pub struct MemorySearchDataSource {
    results: Mutex<HashMap<String, Vec<SearchSuggestion>>>,
}

impl MemorySearchDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, HashMap<String, Vec<SearchSuggestion>>>> {
        self.results.lock().ok()
    }
}

#[async_trait]
impl SearchDataSource for MemorySearchDataSource {
    async fn search(&self, _query: &str, _exact: bool) -> Outcome<Vec<SearchSuggestion>> {
        unsupported_on(Medium::Memory, "search")
    }

    async fn reverse_geocode(&self, _location: &Location) -> Outcome<GeocodedAddress> {
        unsupported_on(Medium::Memory, "reverse_geocode")
    }

    async fn get_cached_search(&self, query: &str) -> Outcome<Vec<SearchSuggestion>> {
        let results = self.lock().ok_or_else(|| Failure::storage("search memo lock poisoned"))?;
        results
            .get(query)
            .cloned()
            .ok_or_else(|| Failure::cache_miss(query))
    }

    async fn set_cached_search(&self, query: &str, results: &[SearchSuggestion]) {
        match self.lock() {
            Some(mut memo) => {
                memo.insert(query.to_owned(), results.to_vec());
            }
            None => warn!(query, "search memo lock poisoned, result not memoised"),
        }
    }

    async fn record_selection(&self, _selection: &SearchSelection) -> Outcome<()> {
        unsupported_on(Medium::Memory, "record_selection")
    }

    async fn get_recent_searches(&self) -> Outcome<Vec<RecentSearch>> {
        unsupported_on(Medium::Memory, "get_recent_searches")
    }
}
