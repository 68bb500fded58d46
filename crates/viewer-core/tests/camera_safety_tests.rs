// Wheel zoom and the perspective dead zone, end to end through the viewer.

use viewer_core::safety::{clamp_depth, zoom_depth};
use viewer_core::{
    CameraKind, ControlEvent, ControlId, Dispatch, MemoryWidgets, UpdateSource, Viewer, Viewport,
    Widgets,
};

fn viewer() -> Viewer<MemoryWidgets> {
    let mut v = Viewer::new(MemoryWidgets::full(), Viewport::new(1280, 720, 1.0));
    v.init_controls();
    v
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn zoom_is_bounded_to_depth_range() {
    assert_eq!(zoom_depth(5.0, 500.0, CameraKind::Perspective), 20.0);
    assert_eq!(zoom_depth(5.0, -500.0, CameraKind::Perspective), -10.0);
    assert_eq!(zoom_depth(5.0, 500.0, CameraKind::Orthographic), 20.0);
    assert_eq!(zoom_depth(5.0, 1.0, CameraKind::Perspective), 6.0);
}

#[test]
fn zoom_into_dead_zone_lands_on_its_edge() {
    assert_eq!(zoom_depth(0.5, -0.4, CameraKind::Perspective), 0.2);
    assert_eq!(zoom_depth(-0.5, 0.4, CameraKind::Perspective), -0.2);
    assert!(approx(zoom_depth(0.5, -0.4, CameraKind::Orthographic), 0.1));
}

#[test]
fn orthographic_depth_is_never_clamped() {
    for z in [-0.19, -0.0, 0.0, 0.05, 0.19] {
        assert_eq!(clamp_depth(z, CameraKind::Orthographic), z);
    }
}

#[test]
fn wheel_moves_depth_and_resyncs_sliders() {
    let mut v = viewer();
    v.widgets_mut().take_writes();
    let before = v.session().params.revision();

    assert_eq!(
        v.dispatch(ControlEvent::Wheel { delta_y: 100.0 }, UpdateSource::UserInput),
        Dispatch::Applied
    );
    let z = v.camera_position().z;
    assert!(approx(z, 6.0));
    assert_eq!(v.session().params.camera_position().z, z);
    assert_eq!(v.session().params.revision(), before + 1);
    assert_eq!(v.widgets().value(ControlId::CameraZ).as_deref(), Some("6.00"));
    assert_eq!(v.widgets().readout(ControlId::CameraZ), Some("6.00"));
    // only the three camera sliders are rewritten
    assert_eq!(v.widgets_mut().take_writes().len(), 3);
}

#[test]
fn huge_wheel_deltas_stop_at_range_ends() {
    let mut v = viewer();
    v.on_wheel(1.0e6);
    assert_eq!(v.camera_position().z, 20.0);
    v.on_wheel(-1.0e6);
    assert_eq!(v.camera_position().z, -10.0);
    assert_eq!(v.widgets().value(ControlId::CameraZ).as_deref(), Some("-10.00"));
}

#[test]
fn wheel_through_zero_skips_dead_zone_in_perspective() {
    let mut v = viewer();
    v.widgets_mut().edit(ControlId::CameraZ, "0.5");
    v.dispatch(
        ControlEvent::Input(ControlId::CameraZ),
        UpdateSource::UserInput,
    );
    v.on_wheel(-40.0);
    assert_eq!(v.camera_position().z, 0.2);
    assert_eq!(v.session().params.camera_position().z, 0.2);
}

#[test]
fn wheel_reaches_zero_in_orthographic() {
    let mut v = viewer();
    v.switch_camera(CameraKind::Orthographic);
    v.on_wheel(-500.0);
    assert!(approx(v.camera_position().z, 0.0));
    assert_eq!(v.session().cameras.active_kind(), CameraKind::Orthographic);
}

#[test]
fn wheel_during_programmatic_write_is_ignored() {
    let mut v = viewer();
    let guard = v.guard().clone();
    let _token = guard.hold();
    assert_eq!(
        v.dispatch(ControlEvent::Wheel { delta_y: 100.0 }, UpdateSource::UserInput),
        Dispatch::Ignored
    );
    assert_eq!(v.camera_position().z, 5.0);
}
