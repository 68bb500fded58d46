// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn wheel_pixels_pass_through() {
    assert_eq!(wheel_delta_pixels(120.0, DOM_DELTA_PIXEL, 800.0), 120.0);
    assert_eq!(wheel_delta_pixels(-53.0, DOM_DELTA_PIXEL, 800.0), -53.0);
}

#[test]
fn wheel_lines_and_pages_are_normalised() {
    assert_eq!(wheel_delta_pixels(3.0, DOM_DELTA_LINE, 800.0), 48.0);
    assert_eq!(wheel_delta_pixels(-1.0, DOM_DELTA_PAGE, 720.0), -720.0);
    // a zero-height page still scrolls
    assert_eq!(wheel_delta_pixels(1.0, DOM_DELTA_PAGE, 0.0), 1.0);
}

#[test]
fn wheel_garbage_is_dropped() {
    assert_eq!(wheel_delta_pixels(f64::NAN, DOM_DELTA_PIXEL, 800.0), 0.0);
    assert_eq!(wheel_delta_pixels(f64::INFINITY, DOM_DELTA_LINE, 800.0), 0.0);
}

#[test]
fn pixel_ratio_is_capped() {
    assert_eq!(capped_pixel_ratio(1.0, 2.0), 1.0);
    assert_eq!(capped_pixel_ratio(1.5, 2.0), 1.5);
    assert_eq!(capped_pixel_ratio(3.0, 2.0), 2.0);
    assert_eq!(capped_pixel_ratio(0.0, 2.0), 1.0);
    assert_eq!(capped_pixel_ratio(f64::NAN, 2.0), 1.0);
}

#[test]
fn logical_size_truncates_css_pixels() {
    assert_eq!(logical_size(1280.6, 719.9), (1280, 719));
    assert_eq!(logical_size(-5.0, f64::NAN), (0, 0));
}

#[test]
fn buttons_map_to_orbit_gestures() {
    assert_eq!(drag_kind_for_button(0, false), Some(DragKind::Rotate));
    assert_eq!(drag_kind_for_button(0, true), Some(DragKind::Pan));
    assert_eq!(drag_kind_for_button(2, false), Some(DragKind::Pan));
    assert_eq!(drag_kind_for_button(1, false), None);
}

#[test]
fn drag_reports_deltas_for_its_pointer_only() {
    let mut drag = PointerDrag::default();
    assert_eq!(drag.motion(1, Vec2::new(5.0, 5.0)), None);

    drag.begin(DragKind::Rotate, 7, Vec2::new(10.0, 10.0));
    assert_eq!(
        drag.motion(7, Vec2::new(14.0, 7.0)),
        Some((DragKind::Rotate, Vec2::new(4.0, -3.0)))
    );
    assert_eq!(drag.motion(8, Vec2::new(100.0, 100.0)), None);
    assert_eq!(
        drag.motion(7, Vec2::new(15.0, 7.0)),
        Some((DragKind::Rotate, Vec2::new(1.0, 0.0)))
    );

    drag.end(8);
    assert!(drag.kind.is_some());
    drag.end(7);
    assert_eq!(drag.motion(7, Vec2::new(20.0, 20.0)), None);
}
