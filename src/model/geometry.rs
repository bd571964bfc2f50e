//! Geometry newtypes shared between the decision core and hosts.

use serde::Serialize;
use std::fmt;

/// Opaque handle to an element owned by a [`Host`](crate::host::Host).
///
/// Hosts issue ids; the core never interprets the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ElementId(usize);

impl ElementId {
    /// Create an id from a host-side raw value.
    pub fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Viewport-relative bounding rectangle in CSS pixels.
///
/// Only the vertical extent matters for sticking, so horizontal edges are
/// not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Distance from the viewport top to the element's top edge.
    pub top: f64,
    /// Distance from the viewport top to the element's bottom edge.
    pub bottom: f64,
}

impl Rect {
    /// Create a rect from its top and bottom edges.
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Create a rect from its top edge and height.
    pub fn from_top_height(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    /// Height of the rect (`bottom - top`).
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}
