//! Bounded, newest-first history of search selections.
//!
//! The store sits on the [`RecentSearchesDao`] port. Eviction runs before
//! every insertion, so the table never holds more than `max_entries` rows.
//! Rows are ordered by `(updated_at desc, id desc)`; equal timestamps fall
//! back to insertion order.

use std::sync::Arc;

use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{RecencyBoundary, RecentSearchesDao, RecentSearchesDaoError};
use crate::domain::{Failure, Outcome, RecentSearch, SearchSelection};

/// Default number of recent searches kept.
pub const RECENTS_MAX_ENTRIES: usize = 10;

/// Capped recent-search history.
pub struct RecencyStore {
    dao: Arc<dyn RecentSearchesDao>,
    clock: Arc<dyn Clock>,
    max_entries: usize,
}

impl RecencyStore {
    /// Build a store keeping at most `max_entries` rows; zero is treated as
    /// one.
    pub fn new(dao: Arc<dyn RecentSearchesDao>, clock: Arc<dyn Clock>, max_entries: usize) -> Self {
        Self {
            dao,
            clock,
            max_entries: max_entries.max(1),
        }
    }

    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Persist a selection, evicting overflow first.
    ///
    /// Selections without a name or a center are dropped without touching
    /// the table.
    pub async fn record_selection(&self, selection: &SearchSelection) -> Outcome<()> {
        let Some(entry) = selection.clone().into_recent(self.clock.utc()) else {
            debug!("ignoring search selection without name or center");
            return Ok(());
        };

        self.evict_overflow().await?;
        self.dao.insert(&entry).await.map_err(map_dao_error)
    }

    /// Make room for one insertion.
    ///
    /// When the table holds `max_entries` rows or more, deletes every row
    /// older than the `(max_entries - 1)`-th newest, keeping `max_entries - 1`
    /// rows. Returns the number of deleted rows.
    pub async fn evict_overflow(&self) -> Outcome<usize> {
        let rows = self.dao.list_newest_first().await.map_err(map_dao_error)?;
        if rows.len() < self.max_entries {
            return Ok(0);
        }

        let keep = self.max_entries - 1;
        let deleted = match keep.checked_sub(1).and_then(|index| rows.get(index)) {
            Some(boundary_row) => {
                let boundary = RecencyBoundary::from(boundary_row);
                self.dao
                    .delete_older_than(&boundary)
                    .await
                    .map_err(map_dao_error)?
            }
            None => self.dao.delete_all().await.map_err(map_dao_error)?,
        };

        debug!(
            rows = rows.len(),
            deleted,
            max_entries = self.max_entries,
            "evicted recent searches over the limit"
        );
        Ok(deleted)
    }

    /// Every stored entry, newest first.
    ///
    /// An empty table is reported as [`Failure::DatabaseMiss`] so callers can
    /// tell "nothing saved yet" apart from a populated list.
    pub async fn fetch_all(&self) -> Outcome<Vec<RecentSearch>> {
        let rows = self.dao.list_newest_first().await.map_err(map_dao_error)?;
        if rows.is_empty() {
            return Err(Failure::database_miss("no recent searches stored"));
        }
        Ok(rows.into_iter().map(|row| row.entry).collect())
    }

    /// Delete every stored entry.
    pub async fn clear(&self) -> Outcome<()> {
        self.dao
            .delete_all()
            .await
            .map(|deleted| debug!(deleted, "cleared recent searches"))
            .map_err(map_dao_error)
    }
}

fn map_dao_error(error: RecentSearchesDaoError) -> Failure {
    Failure::storage(error.to_string())
}
