//! Port for network search, its memo cache and the recent-search history.

use async_trait::async_trait;

use crate::domain::{
    GeocodedAddress, Location, Outcome, RecentSearch, SearchSelection, SearchSuggestion,
};

/// Search data source bound to the network, memory, or the database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchDataSource: Send + Sync {
    /// Search stations and places. Network only.
    ///
    /// A query overtaken by a newer one resolves to
    /// [`Failure::Cancellation`](crate::domain::Failure::Cancellation).
    async fn search(&self, query: &str, exact: bool) -> Outcome<Vec<SearchSuggestion>>;

    /// Address and country of a location. Network only.
    async fn reverse_geocode(&self, location: &Location) -> Outcome<GeocodedAddress>;

    /// Memoised results for `query`. Memory only.
    async fn get_cached_search(&self, query: &str) -> Outcome<Vec<SearchSuggestion>>;

    /// Memoise results for `query`. Memory only; best-effort.
    async fn set_cached_search(&self, query: &str, results: &[SearchSuggestion]);

    /// Remember a selection in the recent-search history. Database only.
    async fn record_selection(&self, selection: &SearchSelection) -> Outcome<()>;

    /// Recent searches, newest first. Database only.
    async fn get_recent_searches(&self) -> Outcome<Vec<RecentSearch>>;
}
