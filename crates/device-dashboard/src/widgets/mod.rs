//! Widget system for the device dashboard.
//!
//! Every card on the dashboard is produced by a [`Widget`]. The
//! [`WidgetRegistry`] maps widget ids to factory functions; the grid looks
//! each layout entry up by id and skips ids nobody registered.
//!
//! Widgets are **stateless renderers**: they read the current
//! [`SignalState`](crate::signals::SignalState) through a
//! [`WidgetContext`] and never query the host themselves.
//!
//! # Example
//!
//! ```
//! use device_dashboard::layout::WidgetDescriptor;
//! use device_dashboard::signals::SignalState;
//! use device_dashboard::widgets::{render_card, WidgetContext, WidgetRegistry};
//!
//! let registry = WidgetRegistry::new();
//! let signals = SignalState::default();
//! let ctx = WidgetContext::new(&signals);
//!
//! let card = render_card(&registry, &WidgetDescriptor::from_id("battery"), 30, &ctx)
//!     .expect("battery is built in");
//! assert_eq!(card.title, "Battery");
//! assert!(render_card(&registry, &WidgetDescriptor::from_id("weather"), 30, &ctx).is_none());
//! ```

pub mod battery;
pub mod context;
pub mod device;
pub mod display;
pub mod location;
pub mod network;
pub mod parts;
pub mod performance;
pub mod permissions;
pub mod storage;

pub use context::WidgetContext;

use ratatui::text::Line;
use std::collections::HashMap;

use crate::layout::WidgetDescriptor;

/// Trait for dashboard widgets.
///
/// A widget turns the current signals into the body lines of one card.
/// Widgets must be `Send + Sync` so the registry can be shared.
pub trait Widget: Send + Sync {
    /// Render the card body.
    ///
    /// # Arguments
    ///
    /// * `width` - Inner width of the card in columns.
    /// * `context` - Shared application state for rendering.
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>>;

    /// Unique identifier for this widget type.
    fn id(&self) -> &'static str;

    /// Action triggered when the card is activated.
    fn action(&self) -> Option<WidgetAction> {
        None
    }
}

/// Something a card can do when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    /// Look up the current position once.
    Locate,
    /// Explain where permissions are managed.
    CheckPermissions,
}

impl WidgetAction {
    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            WidgetAction::Locate => "Get Location",
            WidgetAction::CheckPermissions => "Check Permissions",
        }
    }
}

/// A rendered card, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetCard {
    /// Widget id.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Body lines.
    pub lines: Vec<Line<'static>>,
    /// Action offered by the card.
    pub action: Option<WidgetAction>,
}

impl WidgetCard {
    /// Body as plain text, one entry per line.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.to_string()).collect()
    }
}

/// Renders the card for `descriptor`, or `None` for an unknown id.
pub fn render_card(
    registry: &WidgetRegistry,
    descriptor: &WidgetDescriptor,
    width: u16,
    context: &WidgetContext,
) -> Option<WidgetCard> {
    let widget = registry.create(&descriptor.id)?;
    Some(WidgetCard {
        id: descriptor.id.clone(),
        title: descriptor.title.clone(),
        lines: widget.render(width, context),
        action: widget.action(),
    })
}

/// Factory function type for creating widget instances.
pub type WidgetFactory = fn() -> Box<dyn Widget>;

/// Registry mapping widget identifiers to factory functions.
pub struct WidgetRegistry {
    factories: HashMap<&'static str, WidgetFactory>,
}

impl WidgetRegistry {
    /// Creates a registry with the eight built-in widgets.
    pub fn new() -> Self {
        let mut reg = Self {
            factories: HashMap::new(),
        };
        reg.register("device", device::create);
        reg.register("display", display::create);
        reg.register("performance", performance::create);
        reg.register("battery", battery::create);
        reg.register("network", network::create);
        reg.register("storage", storage::create);
        reg.register("location", location::create);
        reg.register("permissions", permissions::create);
        reg
    }

    /// Register a widget factory for the given identifier.
    ///
    /// Overwrites any existing factory for the same ID.
    pub fn register(&mut self, id: &'static str, factory: WidgetFactory) {
        self.factories.insert(id, factory);
    }

    /// Create a widget instance by identifier.
    ///
    /// Returns `None` if no factory is registered for the given ID.
    pub fn create(&self, id: &str) -> Option<Box<dyn Widget>> {
        self.factories.get(id).map(|f| f())
    }

    /// List all registered widget identifiers, sorted.
    pub fn available_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.factories.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DEFAULT_WIDGETS;
    use crate::signals::SignalState;

    struct MockWidget;

    impl Widget for MockWidget {
        fn render(&self, width: u16, _context: &WidgetContext) -> Vec<Line<'static>> {
            vec![Line::raw(format!("mock:{width}"))]
        }
        fn id(&self) -> &'static str {
            "mock"
        }
    }

    #[test]
    fn test_registry_creates_every_default_widget() {
        let reg = WidgetRegistry::new();
        for (id, _) in DEFAULT_WIDGETS {
            let widget = reg.create(id).unwrap_or_else(|| panic!("expected factory for '{id}'"));
            assert_eq!(widget.id(), *id);
        }
        assert_eq!(reg.available_ids().len(), DEFAULT_WIDGETS.len());
    }

    #[test]
    fn test_registry_returns_none_for_unknown() {
        let reg = WidgetRegistry::new();
        assert!(reg.create("nonexistent").is_none());
        assert!(reg.create("").is_none());
    }

    #[test]
    fn test_registry_register_custom_widget() {
        let mut reg = WidgetRegistry::new();
        fn custom_factory() -> Box<dyn Widget> {
            Box::new(MockWidget)
        }
        reg.register("mock", custom_factory);
        let w = reg.create("mock").expect("custom widget registered");
        assert_eq!(w.id(), "mock");
        assert!(w.action().is_none());
    }

    #[test]
    fn test_render_card_uses_descriptor_title() {
        let reg = WidgetRegistry::new();
        let signals = SignalState::default();
        let ctx = WidgetContext::new(&signals);
        let descriptor = WidgetDescriptor {
            id: "device".to_string(),
            title: "My Laptop".to_string(),
            enabled: true,
        };
        let card = render_card(&reg, &descriptor, 30, &ctx).expect("device is built in");
        assert_eq!(card.id, "device");
        assert_eq!(card.title, "My Laptop");
        assert!(!card.lines.is_empty());
    }

    #[test]
    fn test_render_card_unknown_id_renders_nothing() {
        let reg = WidgetRegistry::new();
        let signals = SignalState::default();
        let ctx = WidgetContext::new(&signals);
        assert!(render_card(&reg, &WidgetDescriptor::from_id("weather"), 30, &ctx).is_none());
    }

    #[test]
    fn test_only_location_and_permissions_have_actions() {
        let reg = WidgetRegistry::new();
        let with_action: Vec<&str> = reg
            .available_ids()
            .into_iter()
            .filter(|id| reg.create(id).and_then(|w| w.action()).is_some())
            .collect();
        assert_eq!(with_action, vec!["location", "permissions"]);
    }

    #[test]
    fn test_widget_trait_object_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Widget>();
    }
}
