//! Stick options and their defaults.

use super::geometry::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default class attached to a stuck element.
pub const DEFAULT_STICKY_CLASS: &str = "is-sticky";

/// Scroll direction filter.
///
/// With `Down`, an element only sticks (and stays stuck) while the page
/// scrolls down or stands still; `Up` is the mirror image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Stick regardless of direction.
    #[default]
    Both,
    /// Stick only while scrolling up.
    Up,
    /// Stick only while scrolling down.
    Down,
}

impl Direction {
    /// Lowercase name (`both`, `up`, `down`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Whether a scroll `velocity` (current minus last offset) passes the filter.
    pub fn admits(&self, velocity: f64) -> bool {
        match self {
            Self::Both => true,
            Self::Down => velocity >= 0.0,
            Self::Up => velocity <= 0.0,
        }
    }
}

/// Error for an unrecognised direction name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid direction {0:?} (expected one of: both, up, down)")]
pub struct InvalidDirection(pub String);

impl FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" => Ok(Self::Both),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where, relative to the viewport top, a stuck element is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TopSpacing {
    /// A fixed distance in pixels.
    Fixed(f64),
    /// Pin just below this element (its bounding rect bottom is used).
    Element(ElementId),
}

impl Default for TopSpacing {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}

/// Options controlling a single sticky element.
#[derive(Debug, Clone, PartialEq)]
pub struct StickOptions {
    /// Class attached to the target while stuck.
    pub sticky_class: String,
    /// Wrap the target in an element with an explicit height so that the
    /// surrounding layout does not collapse when the target becomes fixed.
    pub guard_height: bool,
    /// Container bounding the stick. Defaults to the target's parent.
    pub stick_within: Option<ElementId>,
    /// Distance from the viewport top at which the target sticks.
    pub top_spacing: TopSpacing,
    /// Only stick after this element reaches the sticking position.
    pub stick_after: Option<ElementId>,
    /// Minimum scroll velocity (pixels per tick) required to become stuck.
    pub delta: f64,
    /// Direction filter.
    pub direction: Direction,
}

impl Default for StickOptions {
    fn default() -> Self {
        Self {
            sticky_class: DEFAULT_STICKY_CLASS.to_string(),
            guard_height: true,
            stick_within: None,
            top_spacing: TopSpacing::default(),
            stick_after: None,
            delta: 0.0,
            direction: Direction::Both,
        }
    }
}
