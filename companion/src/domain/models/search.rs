//! Network search results and the recent-search history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Location;

/// Station a search result or recent search points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationDescriptor {
    pub id: String,
    pub name: String,
    /// H3 cell the station reports from.
    pub cell_index: Option<String>,
}

/// One search suggestion returned by the network search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSuggestion {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub center: Option<Location>,
    /// Set when the suggestion is a station rather than a place.
    pub station: Option<StationDescriptor>,
}

/// Raw selection the user made from the search results.
///
/// Fields are optional because suggestions are not guaranteed to carry a
/// name or a center; incomplete selections are never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSelection {
    pub name: Option<String>,
    pub center: Option<Location>,
    pub address: Option<String>,
    pub station: Option<StationDescriptor>,
}

impl SearchSelection {
    /// Promote the selection to a recent-search entry stamped `updated_at`.
    ///
    /// Returns `None` when the name is missing or blank, or the center is
    /// missing.
    pub fn into_recent(self, updated_at: DateTime<Utc>) -> Option<RecentSearch> {
        let name = self.name.filter(|name| !name.trim().is_empty())?;
        let center = self.center?;
        Some(RecentSearch {
            name,
            center,
            address: self.address,
            station: self.station,
            updated_at,
        })
    }
}

impl From<SearchSuggestion> for SearchSelection {
    fn from(value: SearchSuggestion) -> Self {
        Self {
            name: Some(value.name),
            center: value.center,
            address: value.address,
            station: value.station,
        }
    }
}

/// A persisted search selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub name: String,
    pub center: Location,
    pub address: Option<String>,
    pub station: Option<StationDescriptor>,
    pub updated_at: DateTime<Utc>,
}
