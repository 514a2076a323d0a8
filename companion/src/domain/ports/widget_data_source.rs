//! Port for home-screen widget bindings.

use async_trait::async_trait;

use crate::domain::{DeviceId, Outcome, WidgetSettings};

/// Widget data source. Widgets only live in the key-value cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WidgetDataSource: Send + Sync {
    /// Ids of configured widgets; empty when none are stored.
    async fn widget_ids(&self) -> Vec<i32>;

    /// Settings of one widget; unbound when nothing is stored.
    async fn widget_settings(&self, widget_id: i32) -> WidgetSettings;

    /// Device bound to a widget.
    async fn get_widget_device(&self, widget_id: i32) -> Outcome<DeviceId>;

    /// Bind a widget to a device; best-effort.
    async fn set_widget_device(&self, widget_id: i32, device_id: &DeviceId);

    /// Forget a widget; best-effort.
    async fn remove_widget(&self, widget_id: i32);
}
