//! Network search and reverse geocoding.
//!
//! Both operations are superseded by newer calls of the same kind: a result
//! that arrives after a newer call started resolves to
//! [`Failure::Cancellation`](crate::domain::Failure::Cancellation).

use std::sync::Arc;

use async_trait::async_trait;

use super::client::ApiClient;
use super::dto::{GeocodeDto, SearchResultsDto};
use super::query_gate::QueryGate;
use crate::domain::ports::{Medium, SearchDataSource, unsupported_on};
use crate::domain::{
    GeocodedAddress, Location, Outcome, RecentSearch, SearchSelection, SearchSuggestion,
};

const SEARCH: &[&str] = &["api", "v1", "network", "search"];
const GEOCODE: &[&str] = &["api", "v1", "network", "geocode"];

pub struct NetworkSearchDataSource {
    client: Arc<ApiClient>,
    searches: QueryGate,
    geocodes: QueryGate,
}

impl NetworkSearchDataSource {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            searches: QueryGate::default(),
            geocodes: QueryGate::default(),
        }
    }
}

#[async_trait]
impl SearchDataSource for NetworkSearchDataSource {
    async fn search(&self, query: &str, exact: bool) -> Outcome<Vec<SearchSuggestion>> {
        let ticket = self.searches.issue();
        let params = [("query", query.to_owned()), ("exact", exact.to_string())];
        let outcome = match self.client.get_json::<SearchResultsDto>(SEARCH, &params).await {
            Ok(results) => results.into_domain(),
            Err(failure) => Err(failure),
        };
        self.searches.settle(ticket, outcome)
    }

    async fn reverse_geocode(&self, location: &Location) -> Outcome<GeocodedAddress> {
        let ticket = self.geocodes.issue();
        let params = [
            ("lat", location.lat().to_string()),
            ("lon", location.lon().to_string()),
        ];
        let outcome = match self.client.get_json::<GeocodeDto>(GEOCODE, &params).await {
            Ok(dto) => dto.into_domain(),
            Err(failure) => Err(failure),
        };
        self.geocodes.settle(ticket, outcome)
    }

    async fn get_cached_search(&self, _query: &str) -> Outcome<Vec<SearchSuggestion>> {
        unsupported_on(Medium::Network, "get_cached_search")
    }

    async fn set_cached_search(&self, _query: &str, _results: &[SearchSuggestion]) {
        unsupported_on(Medium::Network, "set_cached_search")
    }

    async fn record_selection(&self, _selection: &SearchSelection) -> Outcome<()> {
        unsupported_on(Medium::Network, "record_selection")
    }

    async fn get_recent_searches(&self) -> Outcome<Vec<RecentSearch>> {
        unsupported_on(Medium::Network, "get_recent_searches")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::ports::AnonymousAccess;
    use crate::domain::{Failure, FailureKind};
    use crate::test_support::{StubResponse, StubServer};

    const ATHENS: &str = r#"{"addresses":[{"id":"a-1","name":"Athens","center":{"lat":37.98,"lon":23.72}}]}"#;

    fn source(server: &StubServer) -> Arc<NetworkSearchDataSource> {
        let client = ApiClient::new(
            server.base_url(),
            Duration::from_secs(5),
            Arc::new(AnonymousAccess),
        )
        .expect("client builds");
        Arc::new(NetworkSearchDataSource::new(Arc::new(client)))
    }

    #[tokio::test]
    async fn search_passes_query_and_exact_flag() {
        let server = StubServer::start(vec![(
            "GET",
            "/api/v1/network/search?query=Athens&exact=true",
            StubResponse::json(200, ATHENS),
        )])
        .await;

        let results = source(&server)
            .search("Athens", true)
            .await
            .expect("results");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Athens");
    }

    #[tokio::test]
    async fn slower_superseded_search_resolves_to_cancellation() {
        let server = StubServer::start(vec![
            (
                "GET",
                "/api/v1/network/search?query=Ath&",
                StubResponse::json(200, ATHENS).delayed(Duration::from_millis(300)),
            ),
            (
                "GET",
                "/api/v1/network/search?query=Athens&",
                StubResponse::json(200, ATHENS),
            ),
        ])
        .await;
        let source = source(&server);

        let stale = {
            let source = Arc::clone(&source);
            tokio::spawn(async move { source.search("Ath", false).await })
        };
        while server.requests().is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let fresh = source.search("Athens", false).await;

        let stale = stale.await.expect("task joins");
        assert_eq!(stale.expect_err("superseded").kind(), FailureKind::Cancellation);
        assert_eq!(fresh.expect("newest query wins").len(), 1);
    }

    #[tokio::test]
    async fn geocode_without_country_is_country_not_found() {
        let server = StubServer::start(vec![(
            "GET",
            "/api/v1/network/geocode",
            StubResponse::json(200, r#"{"address":"Open sea"}"#),
        )])
        .await;

        let location = Location::new(35.0, 18.0).expect("valid location");
        let failure = source(&server)
            .reverse_geocode(&location)
            .await
            .expect_err("no country");
        assert_eq!(failure, Failure::CountryNotFound);
    }
}
