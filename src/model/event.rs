//! Lifecycle notifications sent to the host.

use super::css::{CssPosition, CssTop};
use super::geometry::ElementId;
use super::options::{Direction, TopSpacing};
use serde::Serialize;

/// Snapshot of one evaluation, passed with stick/unstick events and to the
/// secondary action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StickDetail {
    /// Whether the target was stuck before this evaluation.
    pub was_sticky: bool,
    /// Whether the target is stuck after this evaluation.
    pub is_sticky: bool,
    /// Inline `position` before this evaluation.
    pub last_position: CssPosition,
    /// Evaluated `position`.
    pub new_position: CssPosition,
    /// Inline `top` before this evaluation.
    pub last_top: CssTop,
    /// Evaluated `top`.
    pub new_top: CssTop,
    /// Container bounding the stick.
    pub stick_within: ElementId,
    /// Element gating the top limit, if any.
    pub stick_after: Option<ElementId>,
    /// Distance from the viewport top, or the element it is derived from.
    pub top_spacing: TopSpacing,
    /// Minimum scroll velocity to become stuck.
    pub delta: f64,
    /// Direction filter.
    pub direction: Direction,
}

/// Notification dispatched on the target element.
#[derive(Debug, Clone, PartialEq)]
pub enum StickEvent {
    /// Before an instance is initialized.
    BeforeInit,
    /// After an instance is initialized.
    AfterInit,
    /// Before the target is made sticky.
    BeforeStick(StickDetail),
    /// After the target is made sticky.
    AfterStick(StickDetail),
    /// Before the target stops being sticky.
    BeforeUnstick(StickDetail),
    /// After the target stops being sticky.
    AfterUnstick(StickDetail),
    /// Before an instance is destroyed.
    BeforeDestroy,
    /// After an instance is destroyed.
    AfterDestroy,
}

impl StickEvent {
    /// DOM event name, e.g. `stick:before-stick`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeforeInit => "stick:before-init",
            Self::AfterInit => "stick:after-init",
            Self::BeforeStick(_) => "stick:before-stick",
            Self::AfterStick(_) => "stick:after-stick",
            Self::BeforeUnstick(_) => "stick:before-unstick",
            Self::AfterUnstick(_) => "stick:after-unstick",
            Self::BeforeDestroy => "stick:before-destroy",
            Self::AfterDestroy => "stick:after-destroy",
        }
    }

    /// Evaluation detail, for stick and unstick events.
    pub fn detail(&self) -> Option<&StickDetail> {
        match self {
            Self::BeforeStick(detail)
            | Self::AfterStick(detail)
            | Self::BeforeUnstick(detail)
            | Self::AfterUnstick(detail) => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> StickDetail {
        StickDetail {
            was_sticky: false,
            is_sticky: true,
            last_position: CssPosition::Unset,
            new_position: CssPosition::Fixed,
            last_top: CssTop::Unset,
            new_top: CssTop::Px(20.0),
            stick_within: ElementId::new(0),
            stick_after: None,
            top_spacing: TopSpacing::Fixed(20.0),
            delta: 0.0,
            direction: Direction::Both,
        }
    }

    #[test]
    fn names_follow_dom_convention() {
        assert_eq!(StickEvent::BeforeInit.name(), "stick:before-init");
        assert_eq!(StickEvent::AfterStick(detail()).name(), "stick:after-stick");
        assert_eq!(StickEvent::AfterDestroy.name(), "stick:after-destroy");
    }

    #[test]
    fn only_transition_events_carry_detail() {
        assert!(StickEvent::BeforeInit.detail().is_none());
        assert_eq!(StickEvent::BeforeUnstick(detail()).detail(), Some(&detail()));
    }

    #[test]
    fn detail_serializes_css_values_as_plain_json() {
        let json = serde_json::to_value(detail()).unwrap();
        assert_eq!(json["last_position"], serde_json::Value::Null);
        assert_eq!(json["new_position"], "fixed");
        assert_eq!(json["new_top"], 20.0);
        assert_eq!(json["direction"], "both");
    }
}
