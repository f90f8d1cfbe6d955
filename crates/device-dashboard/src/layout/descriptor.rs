//! Widget descriptors and the built-in default order.

use serde::{Deserialize, Serialize};

/// Built-in widgets in their default display order, with titles.
pub const DEFAULT_WIDGETS: &[(&str, &str)] = &[
    ("device", "Device"),
    ("display", "Display"),
    ("performance", "Performance"),
    ("battery", "Battery"),
    ("network", "Network"),
    ("storage", "Storage"),
    ("location", "Location"),
    ("permissions", "Permissions"),
];

/// One entry of the layout order. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    /// Widget identifier used for renderer dispatch.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Disabled widgets keep their slot but are not drawn.
    pub enabled: bool,
}

impl WidgetDescriptor {
    /// Creates an enabled descriptor titled from the default table.
    pub fn from_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title_for(id),
            enabled: true,
        }
    }
}

/// Title of a built-in widget, or the id itself for unknown ids.
pub fn title_for(id: &str) -> String {
    DEFAULT_WIDGETS
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, title)| (*title).to_string())
        .unwrap_or_else(|| id.to_string())
}

/// The built-in eight-widget order.
pub fn default_order() -> Vec<WidgetDescriptor> {
    DEFAULT_WIDGETS
        .iter()
        .map(|(id, title)| WidgetDescriptor {
            id: (*id).to_string(),
            title: (*title).to_string(),
            enabled: true,
        })
        .collect()
}
