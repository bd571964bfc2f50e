//! Host environment seam.
//!
//! The sticky core never touches a document directly. Everything it needs
//! to know (scroll offset, element rects, inline styles) and everything it
//! wants done (style writes, class toggles, wrapper insertion, listener
//! wiring, event dispatch) goes through [`Host`]. A browser binding would
//! implement it over the DOM; [`sim::SimHost`] implements it over an
//! in-memory page for replaying scenarios and for tests.

use crate::model::{ElementId, HostError, Rect, StickEvent};

pub mod sim;

pub use sim::{HostCommand, SimHost};

/// Geometry queries and style/class commands supplied by the environment.
pub trait Host {
    /// Current vertical scroll offset of the window.
    fn scroll_y(&self) -> f64;

    /// Parent of `element`, or `None` when detached or at the root.
    fn parent(&self, element: ElementId) -> Result<Option<ElementId>, HostError>;

    /// Viewport-relative bounding rect of `element`.
    fn bounding_rect(&self, element: ElementId) -> Result<Rect, HostError>;

    /// Offset of `element`'s top edge within its offset parent.
    fn offset_top(&self, element: ElementId) -> Result<f64, HostError>;

    /// Layout height of `element`.
    fn offset_height(&self, element: ElementId) -> Result<f64, HostError>;

    /// Inline style value of `property`, or `None` when not set.
    fn style_property(&self, element: ElementId, property: &str)
        -> Result<Option<String>, HostError>;

    /// Full inline style text.
    fn css_text(&self, element: ElementId) -> Result<String, HostError>;

    /// Replace the full inline style text.
    fn set_css_text(&mut self, element: ElementId, css_text: &str) -> Result<(), HostError>;

    /// Set one inline property; `None` removes it.
    fn set_style_property(
        &mut self,
        element: ElementId,
        property: &str,
        value: Option<&str>,
    ) -> Result<(), HostError>;

    /// Add `class` to `element`'s class list.
    fn add_class(&mut self, element: ElementId, class: &str) -> Result<(), HostError>;

    /// Remove `class` from `element`'s class list.
    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<(), HostError>;

    /// Insert a new element in `target`'s place and move `target` inside it.
    ///
    /// Returns the new wrapper.
    fn insert_guard_wrapper(&mut self, target: ElementId) -> Result<ElementId, HostError>;

    /// Start or stop delivering scroll and resize notifications for `target`.
    fn set_listening(&mut self, target: ElementId, listening: bool);

    /// Dispatch a lifecycle event on `target`.
    fn dispatch(&mut self, target: ElementId, event: &StickEvent);
}
