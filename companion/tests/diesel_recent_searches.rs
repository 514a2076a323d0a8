//! Recency store behaviour against a real SQLite file.

use std::sync::Arc;

use chrono::TimeDelta;
use companion::domain::{
    FailureKind, Location, RecencyStore, RecentSearch, SearchSelection, StationDescriptor,
};
use companion::outbound::persistence::DieselRecentSearchesDao;
use rstest::rstest;

mod support;

use support::{FixedClock, TemporaryDatabase, morning};

fn selection(name: &str) -> SearchSelection {
    SearchSelection {
        name: Some(name.to_owned()),
        center: Some(Location::new(40.64, 22.94).expect("valid location")),
        address: Some("Greece".to_owned()),
        station: None,
    }
}

async fn store(max_entries: usize) -> (RecencyStore, Arc<FixedClock>, TemporaryDatabase) {
    let database = TemporaryDatabase::create().await;
    let clock = Arc::new(FixedClock::at(morning()));
    let store = RecencyStore::new(
        Arc::new(DieselRecentSearchesDao::new(database.pool.clone())),
        clock.clone(),
        max_entries,
    );
    (store, clock, database)
}

fn names(entries: &[RecentSearch]) -> Vec<&str> {
    entries.iter().map(|entry| entry.name.as_str()).collect()
}

#[tokio::test]
async fn empty_table_is_a_database_miss() {
    let (store, _clock, _database) = store(3).await;

    let failure = store.fetch_all().await.expect_err("nothing stored");
    assert_eq!(failure.kind(), FailureKind::DatabaseMiss);
}

#[tokio::test]
async fn entries_come_back_newest_first() {
    let (store, clock, _database) = store(5).await;
    for name in ["Athens", "Larissa", "Volos"] {
        store.record_selection(&selection(name)).await.expect("stored");
        clock.advance_seconds(60);
    }

    let entries = store.fetch_all().await.expect("entries");
    assert_eq!(names(&entries), ["Volos", "Larissa", "Athens"]);
    assert_eq!(
        entries.first().map(|entry| entry.updated_at),
        Some(morning() + TimeDelta::seconds(120))
    );
}

#[tokio::test]
async fn equal_timestamps_fall_back_to_insertion_order() {
    let (store, _clock, _database) = store(3).await;
    for name in ["Athens", "Larissa", "Volos", "Chania", "Kavala"] {
        store.record_selection(&selection(name)).await.expect("stored");
    }

    let entries = store.fetch_all().await.expect("entries");
    assert_eq!(names(&entries), ["Kavala", "Chania", "Volos"]);
}

#[rstest]
#[case::single(1, vec!["Kavala"])]
#[case::pair(2, vec!["Kavala", "Chania"])]
#[tokio::test]
async fn table_never_exceeds_the_cap(#[case] cap: usize, #[case] expected: Vec<&str>) {
    let (store, clock, _database) = store(cap).await;
    for name in ["Athens", "Larissa", "Volos", "Chania", "Kavala"] {
        store.record_selection(&selection(name)).await.expect("stored");
        clock.advance_seconds(1);
    }

    let entries = store.fetch_all().await.expect("entries");
    assert_eq!(names(&entries), expected);
}

#[tokio::test]
async fn incomplete_selections_are_not_persisted() {
    let (store, _clock, _database) = store(3).await;
    let nameless = SearchSelection {
        name: None,
        ..selection("ignored")
    };
    let centreless = SearchSelection {
        center: None,
        ..selection("Nowhere")
    };

    store.record_selection(&nameless).await.expect("ignored");
    store.record_selection(&centreless).await.expect("ignored");

    let failure = store.fetch_all().await.expect_err("nothing stored");
    assert_eq!(failure.kind(), FailureKind::DatabaseMiss);
}

#[tokio::test]
async fn stations_round_trip_through_the_table() {
    let (store, _clock, _database) = store(3).await;
    let station = StationDescriptor {
        id: "st-42".to_owned(),
        name: "Harbour Mast".to_owned(),
        cell_index: Some("872a1072bffffff".to_owned()),
    };
    let chosen = SearchSelection {
        station: Some(station.clone()),
        ..selection("Harbour Mast")
    };

    store.record_selection(&chosen).await.expect("stored");

    let entries = store.fetch_all().await.expect("entries");
    let stored = entries.first().expect("one entry");
    assert_eq!(stored.station.as_ref(), Some(&station));
    assert_eq!(stored.address.as_deref(), Some("Greece"));
    assert_eq!(stored.center, Location::new(40.64, 22.94).expect("valid location"));
}

#[tokio::test]
async fn clear_empties_the_table() {
    let (store, _clock, _database) = store(3).await;
    store.record_selection(&selection("Athens")).await.expect("stored");

    store.clear().await.expect("cleared");

    let failure = store.fetch_all().await.expect_err("table emptied");
    assert_eq!(failure.kind(), FailureKind::DatabaseMiss);
}
