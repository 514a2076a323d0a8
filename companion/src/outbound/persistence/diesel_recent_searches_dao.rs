//! SQLite table behind the recent-search store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    RecencyBoundary, RecentSearchesDao, RecentSearchesDaoError, StoredRecentSearch,
};
use crate::domain::{Location, RecentSearch, StationDescriptor};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewRecentSearchRow, RecentSearchRow};
use super::pool::{DbPool, PoolError};
use super::schema::recent_searches;

/// Diesel implementation of [`RecentSearchesDao`].
///
/// Timestamps are stored as Unix milliseconds; anything finer is dropped on
/// insertion.
#[derive(Clone)]
pub struct DieselRecentSearchesDao {
    pool: DbPool,
}

impl DieselRecentSearchesDao {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn dao_pool_error(error: PoolError) -> RecentSearchesDaoError {
    map_pool_error(error, RecentSearchesDaoError::connection)
}

fn dao_diesel_error(error: diesel::result::Error) -> RecentSearchesDaoError {
    map_diesel_error(
        error,
        RecentSearchesDaoError::query,
        RecentSearchesDaoError::connection,
    )
}

fn entry_to_row(entry: &RecentSearch) -> NewRecentSearchRow {
    let station = entry.station.as_ref();
    NewRecentSearchRow {
        name: entry.name.clone(),
        center_lat: entry.center.lat(),
        center_lon: entry.center.lon(),
        address: entry.address.clone(),
        station_id: station.map(|station| station.id.clone()),
        station_name: station.map(|station| station.name.clone()),
        station_cell_index: station.and_then(|station| station.cell_index.clone()),
        updated_at_ms: entry.updated_at.timestamp_millis(),
    }
}

fn row_to_stored(row: RecentSearchRow) -> Result<StoredRecentSearch, RecentSearchesDaoError> {
    let center = Location::new(row.center_lat, row.center_lon).map_err(|err| {
        RecentSearchesDaoError::query(format!("row {} has an invalid center: {err}", row.id))
    })?;
    let updated_at = DateTime::<Utc>::from_timestamp_millis(row.updated_at_ms).ok_or_else(|| {
        RecentSearchesDaoError::query(format!("row {} has an invalid timestamp", row.id))
    })?;
    let station = match (row.station_id, row.station_name) {
        (Some(id), Some(name)) => Some(StationDescriptor {
            id,
            name,
            cell_index: row.station_cell_index,
        }),
        _ => None,
    };

    Ok(StoredRecentSearch {
        id: row.id,
        entry: RecentSearch {
            name: row.name,
            center,
            address: row.address,
            station,
            updated_at,
        },
    })
}

#[async_trait]
impl RecentSearchesDao for DieselRecentSearchesDao {
    async fn insert(&self, entry: &RecentSearch) -> Result<(), RecentSearchesDaoError> {
        let row = entry_to_row(entry);
        let mut conn = self.pool.get().await.map_err(dao_pool_error)?;
        diesel::insert_into(recent_searches::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(dao_diesel_error)
    }

    async fn list_newest_first(&self) -> Result<Vec<StoredRecentSearch>, RecentSearchesDaoError> {
        let mut conn = self.pool.get().await.map_err(dao_pool_error)?;
        let rows: Vec<RecentSearchRow> = recent_searches::table
            .order((
                recent_searches::updated_at_ms.desc(),
                recent_searches::id.desc(),
            ))
            .select(RecentSearchRow::as_select())
            .load(&mut conn)
            .await
            .map_err(dao_diesel_error)?;

        rows.into_iter().map(row_to_stored).collect()
    }

    async fn delete_older_than(
        &self,
        boundary: &RecencyBoundary,
    ) -> Result<usize, RecentSearchesDaoError> {
        let updated_at_ms = boundary.updated_at.timestamp_millis();
        let mut conn = self.pool.get().await.map_err(dao_pool_error)?;
        diesel::delete(
            recent_searches::table.filter(
                recent_searches::updated_at_ms.lt(updated_at_ms).or(recent_searches::updated_at_ms
                    .eq(updated_at_ms)
                    .and(recent_searches::id.lt(boundary.id))),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(dao_diesel_error)
    }

    async fn delete_all(&self) -> Result<usize, RecentSearchesDaoError> {
        let mut conn = self.pool.get().await.map_err(dao_pool_error)?;
        diesel::delete(recent_searches::table)
            .execute(&mut conn)
            .await
            .map_err(dao_diesel_error)
    }
}
