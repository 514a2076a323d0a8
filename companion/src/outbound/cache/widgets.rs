//! Home-screen widget bindings.
//!
//! The cache keeps the list of widget ids plus one entry per widget holding
//! the bound device id.

use async_trait::async_trait;
use tracing::warn;

use super::json_cache::JsonCache;
use crate::domain::ports::WidgetDataSource;
use crate::domain::{DeviceId, Outcome, WidgetSettings};

const CONCEPT: &str = "widget";
const IDS: &str = "ids";

pub struct CacheWidgetDataSource {
    cache: JsonCache,
}

impl CacheWidgetDataSource {
    pub fn new(cache: JsonCache) -> Self {
        Self { cache }
    }

    async fn store_ids(&self, ids: &[i32]) {
        self.cache.write(CONCEPT, IDS, ids, None).await;
    }
}

#[async_trait]
impl WidgetDataSource for CacheWidgetDataSource {
    async fn widget_ids(&self) -> Vec<i32> {
        match self.cache.read(CONCEPT, IDS).await {
            Ok(ids) => ids,
            Err(failure) => {
                if !failure.is_local_miss() {
                    warn!(error = %failure, "failed to read widget ids");
                }
                Vec::new()
            }
        }
    }

    async fn widget_settings(&self, widget_id: i32) -> WidgetSettings {
        WidgetSettings {
            widget_id,
            device_id: self.get_widget_device(widget_id).await.ok(),
        }
    }

    async fn get_widget_device(&self, widget_id: i32) -> Outcome<DeviceId> {
        self.cache.read(CONCEPT, &widget_id.to_string()).await
    }

    async fn set_widget_device(&self, widget_id: i32, device_id: &DeviceId) {
        self.cache
            .write(CONCEPT, &widget_id.to_string(), device_id, None)
            .await;
        let mut ids = self.widget_ids().await;
        if !ids.contains(&widget_id) {
            ids.push(widget_id);
            self.store_ids(&ids).await;
        }
    }

    async fn remove_widget(&self, widget_id: i32) {
        self.cache.remove(CONCEPT, &widget_id.to_string()).await;
        let mut ids = self.widget_ids().await;
        let before = ids.len();
        ids.retain(|id| *id != widget_id);
        if ids.len() != before {
            self.store_ids(&ids).await;
        }
    }
}
