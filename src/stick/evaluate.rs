//! Stickiness decision.
//!
//! Pure function from a geometry snapshot to `{stick?, position, top}`.
//! All inputs are measured by the caller; nothing here queries a host.

use crate::model::{CssPosition, Direction, Rect};
use serde::Serialize;

/// Geometry snapshot for one evaluation.
///
/// Rect values are viewport-relative, as returned by a bounding-rect query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurements {
    /// Bounding rect of the sticky target.
    pub target: Rect,
    /// Top edge of the target's wrapper (guard element or parent).
    pub wrapper_top: f64,
    /// Bottom edge of the container bounding the stick.
    pub container_bottom: f64,
    /// Top edge of the element that sets the upper stick limit.
    pub top_limit_top: f64,
    /// Distance from the viewport top at which the target is pinned.
    pub distance: f64,
}

/// Scroll offsets for the previous and current tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMotion {
    /// Offset at the previous evaluation.
    pub last_y: f64,
    /// Offset now.
    pub y: f64,
}

impl ScrollMotion {
    /// Create a motion sample.
    pub fn new(last_y: f64, y: f64) -> Self {
        Self { last_y, y }
    }

    /// Signed distance scrolled since the last tick (positive is down).
    pub fn velocity(&self) -> f64 {
        self.y - self.last_y
    }
}

/// Velocity and direction gates applied before sticking.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickFilter {
    /// Minimum absolute velocity to become stuck. Ignored while stuck.
    pub delta: f64,
    /// Direction filter. Applies while stuck too.
    pub direction: Direction,
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Whether the target should be stuck.
    pub make_sticky: bool,
    /// `position` to apply: `fixed` while pinned, `relative` otherwise.
    pub position: CssPosition,
    /// `top` to apply, in pixels.
    pub top: f64,
}

impl Evaluation {
    fn rest() -> Self {
        Self {
            make_sticky: false,
            position: CssPosition::Relative,
            top: 0.0,
        }
    }
}

/// Decide whether the target should stick, and where.
///
/// The target sticks once the scroll offset passes the top limit (the
/// limiting element's top minus `distance`), provided the velocity and
/// direction gates pass. While stuck it is `fixed` at `distance`; once the
/// container's bottom would be overrun it switches to `relative` with a
/// `top` that parks it flush against the container's bottom edge.
pub fn evaluate_stick(
    measurements: &Measurements,
    motion: ScrollMotion,
    filter: StickFilter,
    was_sticky: bool,
) -> Evaluation {
    let Measurements {
        target,
        wrapper_top,
        container_bottom,
        top_limit_top,
        distance,
    } = *measurements;
    let y = motion.y;

    let target_height = target.height();
    let limit_top = top_limit_top + y - distance;
    let limit_bottom = container_bottom + y - target_height - distance;

    let velocity = motion.velocity();
    let above_delta = was_sticky || filter.delta <= velocity.abs();
    let right_direction = filter.direction.admits(velocity);

    let make_sticky = above_delta && right_direction && y >= limit_top;

    let evaluation = if !make_sticky {
        Evaluation::rest()
    } else if y <= limit_bottom {
        Evaluation {
            make_sticky,
            position: CssPosition::Fixed,
            top: distance,
        }
    } else {
        Evaluation {
            make_sticky,
            position: CssPosition::Relative,
            top: container_bottom - (wrapper_top + target_height),
        }
    };

    tracing::trace!(
        y,
        velocity,
        limit_top,
        limit_bottom,
        make_sticky = evaluation.make_sticky,
        top = evaluation.top,
        "evaluated stick"
    );

    evaluation
}

#[cfg(test)]
#[path = "evaluate_tests.rs"]
mod tests;
