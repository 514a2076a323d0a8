//! Shared fixtures for the SQLite integration suites.

#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use companion::outbound::persistence::{DbPool, PoolConfig};
use mockable::Clock;
use tempfile::TempDir;

/// A migrated database living in its own temporary directory.
pub struct TemporaryDatabase {
    pub pool: DbPool,
    _dir: TempDir,
}

impl TemporaryDatabase {
    pub async fn create() -> Self {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join("companion.sqlite3");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()).with_max_size(2))
            .await
            .expect("pool over a fresh database");
        Self { pool, _dir: dir }
    }
}

/// Clock frozen at a given instant until a test moves it.
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.0.lock().expect("clock lock") += TimeDelta::seconds(seconds);
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

pub fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}
