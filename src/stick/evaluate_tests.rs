//! Tests for the stickiness decision.

use super::*;

// A 200px sidebar at document y=150 inside a container spanning 100..1100,
// pinned 20px below the viewport top. Its limits are therefore:
//   limit_top    = 150 - 20             = 130
//   limit_bottom = 1100 - 200 - 20      = 880
fn sidebar_at(y: f64) -> Measurements {
    Measurements {
        target: Rect::from_top_height(150.0 - y, 200.0),
        wrapper_top: 150.0 - y,
        container_bottom: 1100.0 - y,
        top_limit_top: 150.0 - y,
        distance: 20.0,
    }
}

fn still(y: f64) -> ScrollMotion {
    ScrollMotion::new(y, y)
}

fn any_direction() -> StickFilter {
    StickFilter::default()
}

#[test]
fn above_top_limit_rests_relative_at_zero() {
    let eval = evaluate_stick(&sidebar_at(0.0), still(0.0), any_direction(), false);
    assert_eq!(
        eval,
        Evaluation {
            make_sticky: false,
            position: CssPosition::Relative,
            top: 0.0,
        }
    );
}

#[test]
fn one_pixel_before_top_limit_does_not_stick() {
    let eval = evaluate_stick(&sidebar_at(129.0), still(129.0), any_direction(), false);
    assert!(!eval.make_sticky);
}

#[test]
fn reaching_top_limit_sticks_fixed_at_distance() {
    let eval = evaluate_stick(&sidebar_at(130.0), still(130.0), any_direction(), false);
    assert!(eval.make_sticky);
    assert_eq!(eval.position, CssPosition::Fixed);
    assert_eq!(eval.top, 20.0);
}

#[test]
fn at_bottom_limit_stays_fixed() {
    let eval = evaluate_stick(&sidebar_at(880.0), still(880.0), any_direction(), true);
    assert_eq!(eval.position, CssPosition::Fixed);
    assert_eq!(eval.top, 20.0);
}

#[test]
fn past_bottom_limit_parks_against_container_bottom() {
    for y in [881.0, 950.0, 2000.0] {
        let eval = evaluate_stick(&sidebar_at(y), still(y), any_direction(), true);
        assert!(eval.make_sticky, "still stuck at y={y}");
        assert_eq!(eval.position, CssPosition::Relative);
        // Wrapper at 150, target 200 tall: bottom edge lands on 1100.
        assert_eq!(eval.top, 750.0, "parked offset at y={y}");
    }
}

#[test]
fn slow_scroll_below_delta_does_not_stick() {
    let filter = StickFilter {
        delta: 50.0,
        direction: Direction::Both,
    };
    let eval = evaluate_stick(&sidebar_at(300.0), ScrollMotion::new(280.0, 300.0), filter, false);
    assert!(!eval.make_sticky);
}

#[test]
fn scroll_exactly_at_delta_sticks() {
    let filter = StickFilter {
        delta: 50.0,
        direction: Direction::Both,
    };
    let eval = evaluate_stick(&sidebar_at(300.0), ScrollMotion::new(250.0, 300.0), filter, false);
    assert!(eval.make_sticky);
}

#[test]
fn delta_counts_upward_velocity_by_magnitude() {
    let filter = StickFilter {
        delta: 50.0,
        direction: Direction::Both,
    };
    let eval = evaluate_stick(&sidebar_at(300.0), ScrollMotion::new(400.0, 300.0), filter, false);
    assert!(eval.make_sticky);
}

#[test]
fn delta_is_ignored_once_stuck() {
    let filter = StickFilter {
        delta: 50.0,
        direction: Direction::Both,
    };
    let eval = evaluate_stick(&sidebar_at(300.0), ScrollMotion::new(299.0, 300.0), filter, true);
    assert!(eval.make_sticky);
}

#[test]
fn down_only_unsticks_when_scrolling_up_even_if_stuck() {
    let filter = StickFilter {
        delta: 0.0,
        direction: Direction::Down,
    };
    let eval = evaluate_stick(&sidebar_at(300.0), ScrollMotion::new(310.0, 300.0), filter, true);
    assert!(!eval.make_sticky);
    assert_eq!(eval.top, 0.0);
}

#[test]
fn down_only_sticks_when_scrolling_down() {
    let filter = StickFilter {
        delta: 0.0,
        direction: Direction::Down,
    };
    let eval = evaluate_stick(&sidebar_at(300.0), ScrollMotion::new(290.0, 300.0), filter, false);
    assert!(eval.make_sticky);
}

#[test]
fn up_only_admits_a_standing_page() {
    let filter = StickFilter {
        delta: 0.0,
        direction: Direction::Up,
    };
    let eval = evaluate_stick(&sidebar_at(300.0), still(300.0), filter, false);
    assert!(eval.make_sticky);
}

#[test]
fn larger_distance_moves_top_limit_earlier() {
    let mut measurements = sidebar_at(90.0);
    measurements.distance = 64.0;
    // limit_top = 150 - 64 = 86
    let eval = evaluate_stick(&measurements, still(90.0), any_direction(), false);
    assert!(eval.make_sticky);
    assert_eq!(eval.top, 64.0);
}

#[test]
fn later_top_limit_element_delays_sticking() {
    // A stick-after element at document y=400.
    let mut measurements = sidebar_at(300.0);
    measurements.top_limit_top = 400.0 - 300.0;
    let eval = evaluate_stick(&measurements, still(300.0), any_direction(), false);
    assert!(!eval.make_sticky, "limit_top is 380");

    let mut measurements = sidebar_at(380.0);
    measurements.top_limit_top = 400.0 - 380.0;
    let eval = evaluate_stick(&measurements, still(380.0), any_direction(), false);
    assert!(eval.make_sticky);
}

#[test]
fn target_taller_than_container_room_parks_immediately() {
    // Container 100..300 with a 250px target: limit_bottom < limit_top.
    let y = 200.0;
    let measurements = Measurements {
        target: Rect::from_top_height(100.0 - y, 250.0),
        wrapper_top: 100.0 - y,
        container_bottom: 300.0 - y,
        top_limit_top: 100.0 - y,
        distance: 0.0,
    };
    let eval = evaluate_stick(&measurements, still(y), any_direction(), false);
    assert!(eval.make_sticky);
    assert_eq!(eval.position, CssPosition::Relative);
    assert_eq!(eval.top, -50.0);
}

#[test]
fn velocity_is_current_minus_last() {
    assert_eq!(ScrollMotion::new(100.0, 40.0).velocity(), -60.0);
}
