//! Home-screen widget configuration.

use serde::{Deserialize, Serialize};

use super::DeviceId;

/// Device a home-screen widget is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSettings {
    pub widget_id: i32,
    pub device_id: Option<DeviceId>,
}
