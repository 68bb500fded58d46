// Animation driver: rotation stepping, camera sync and the stop-on-error rule.

use viewer_core::scene::Scene;
use viewer_core::{
    AnimationDriver, ControlEvent, ControlId, DriverState, FrameRenderer, MemoryWidgets,
    SceneCamera, UpdateSource, Viewer, Viewport, Widgets,
};

/// Counts draw calls; fails every call from `fail_from` onwards.
#[derive(Default)]
struct CountingRenderer {
    calls: usize,
    fail_from: Option<usize>,
}

impl FrameRenderer for CountingRenderer {
    fn set_size(&mut self, _width: u32, _height: u32) {}
    fn set_pixel_ratio(&mut self, _ratio: f64) {}
    fn render(&mut self, _scene: &Scene, _camera: &dyn SceneCamera) -> anyhow::Result<()> {
        self.calls += 1;
        match self.fail_from {
            Some(n) if self.calls >= n => anyhow::bail!("device lost"),
            _ => Ok(()),
        }
    }
}

fn viewer() -> Viewer<MemoryWidgets> {
    let mut v = Viewer::new(MemoryWidgets::full(), Viewport::new(1280, 720, 1.0));
    v.init_controls();
    v
}

#[test]
fn ten_ticks_advance_rotation_by_ten_steps() {
    let mut v = viewer();
    let mut driver = AnimationDriver::new();
    let mut renderer = CountingRenderer::default();
    for _ in 0..10 {
        assert_eq!(driver.tick(&mut v, &mut renderer), DriverState::Running);
    }
    let dode = v.session().dodecahedron().unwrap().transform.rotation;
    let slab = v.session().slab().unwrap().transform.rotation;
    assert!((dode.x - 0.10).abs() < 1e-5);
    assert!((dode.y - 0.10).abs() < 1e-5);
    assert!((slab.y - 0.05).abs() < 1e-5);
    assert_eq!(slab.x, 0.0);
    assert_eq!(driver.frames(), 10);
    assert_eq!(renderer.calls, 10);
}

#[test]
fn speed_change_applies_on_next_tick() {
    let mut v = viewer();
    let mut driver = AnimationDriver::new();
    let mut renderer = CountingRenderer::default();
    v.widgets_mut().edit(ControlId::BoxSpeedY, "0.1");
    v.dispatch(ControlEvent::Input(ControlId::BoxSpeedY), UpdateSource::UserInput);
    driver.tick(&mut v, &mut renderer);
    let slab = v.session().slab().unwrap().transform.rotation;
    assert!((slab.y - 0.1).abs() < 1e-6);
}

#[test]
fn render_failure_stops_the_driver_for_good() {
    let mut v = viewer();
    let mut driver = AnimationDriver::new();
    let mut renderer = CountingRenderer {
        calls: 0,
        fail_from: Some(3),
    };
    assert_eq!(driver.tick(&mut v, &mut renderer), DriverState::Running);
    assert_eq!(driver.tick(&mut v, &mut renderer), DriverState::Running);
    assert_eq!(driver.tick(&mut v, &mut renderer), DriverState::Stopped);
    let frozen = v.session().dodecahedron().unwrap().transform.rotation;

    // even once the renderer would succeed again, nothing more happens
    renderer.fail_from = None;
    for _ in 0..5 {
        assert_eq!(driver.tick(&mut v, &mut renderer), DriverState::Stopped);
    }
    assert!(!driver.is_running());
    assert_eq!(renderer.calls, 3);
    assert_eq!(driver.frames(), 2);
    assert_eq!(v.session().dodecahedron().unwrap().transform.rotation, frozen);
}

#[test]
fn controls_keep_working_after_stop() {
    let mut v = viewer();
    let mut driver = AnimationDriver::new();
    let mut renderer = CountingRenderer {
        calls: 0,
        fail_from: Some(1),
    };
    assert_eq!(driver.tick(&mut v, &mut renderer), DriverState::Stopped);
    v.widgets_mut().edit(ControlId::CameraX, "2");
    v.dispatch(ControlEvent::Input(ControlId::CameraX), UpdateSource::UserInput);
    assert_eq!(v.camera_position().x, 2.0);
}

#[test]
fn orbit_drag_syncs_camera_sliders() {
    let mut v = viewer();
    let mut driver = AnimationDriver::new();
    let mut renderer = CountingRenderer::default();
    driver.tick(&mut v, &mut renderer);

    v.session_mut().orbit.rotate(120.0, 0.0, 720.0);
    driver.tick(&mut v, &mut renderer);

    let position = v.camera_position();
    assert!(position.x.abs() > 0.0);
    assert_eq!(v.session().params.camera_position(), position);
    let shown = format!("{:.2}", position.x);
    assert_eq!(v.widgets().value(ControlId::CameraX), Some(shown));
}

#[test]
fn idle_orbit_leaves_store_alone() {
    let mut v = viewer();
    let mut driver = AnimationDriver::new();
    let mut renderer = CountingRenderer::default();
    driver.tick(&mut v, &mut renderer);
    let revision = v.session().params.revision();
    for _ in 0..5 {
        driver.tick(&mut v, &mut renderer);
    }
    assert_eq!(v.session().params.revision(), revision);
}
