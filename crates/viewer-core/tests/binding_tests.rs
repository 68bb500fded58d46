// Control binding: widget events in, scene/store/widget updates out.

use glam::{Vec2, Vec3};
use viewer_core::scene::Scene;
use viewer_core::{
    CameraKind, ControlEvent, ControlId, Dispatch, FrameRenderer, LightKind, MaterialKind,
    MemoryWidgets, Panel, Rgb, SceneCamera, UpdateSource, Viewer, Viewport, Widgets,
};

fn viewer() -> Viewer<MemoryWidgets> {
    let mut v = Viewer::new(MemoryWidgets::full(), Viewport::new(1280, 720, 1.0));
    v.init_controls();
    v.widgets_mut().take_writes();
    v
}

/// Simulate the user editing a widget and the resulting event.
fn user_edit(v: &mut Viewer<MemoryWidgets>, id: ControlId, value: &str) -> Dispatch {
    assert!(v.widgets_mut().edit(id, value), "{:?} missing", id);
    let event = if id.is_select() {
        ControlEvent::Change(id)
    } else {
        ControlEvent::Input(id)
    };
    v.dispatch(event, UpdateSource::UserInput)
}

#[derive(Default)]
struct SizeRecorder {
    size: Option<(u32, u32)>,
    ratio: Option<f64>,
}

impl FrameRenderer for SizeRecorder {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }
    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.ratio = Some(ratio);
    }
    fn render(&mut self, _scene: &Scene, _camera: &dyn SceneCamera) -> anyhow::Result<()> {
        Ok(())
    }
}

#[test]
fn controls_start_from_stored_defaults() {
    let v = viewer();
    let w = v.widgets();
    assert_eq!(w.value(ControlId::CameraZ).as_deref(), Some("5"));
    assert_eq!(w.readout(ControlId::CameraZ), Some("5.00"));
    assert_eq!(w.readout(ControlId::BoxY), Some("-1.20"));
    assert_eq!(w.value(ControlId::DodeColor).as_deref(), Some("#468585"));
    assert_eq!(w.value(ControlId::BoxColor).as_deref(), Some("#b4b4b3"));
    assert_eq!(w.value(ControlId::CameraSelect).as_deref(), Some("perspective"));
    assert_eq!(w.value(ControlId::MaterialSelect).as_deref(), Some("lambert"));
    assert_eq!(w.value(ControlId::LightSelect).as_deref(), Some("spot"));
    assert_eq!(w.value(ControlId::DodeSpeedX).as_deref(), Some("0.01"));
}

#[test]
fn camera_sync_writes_store_once_and_never_reenters() {
    let mut v = viewer();
    v.session_mut()
        .cameras
        .active_mut()
        .set_position(Vec3::new(1.0, 2.0, 3.0));

    let before = v.session().params.revision();
    assert_eq!(
        v.dispatch(ControlEvent::CameraMoved, UpdateSource::AnimationTick),
        Dispatch::Applied
    );
    assert_eq!(v.session().params.revision(), before + 1);
    assert_eq!(v.session().params.camera_position(), Vec3::new(1.0, 2.0, 3.0));

    // The three slider writes echo back as programmatic events: all ignored.
    let writes = v.widgets_mut().take_writes();
    assert_eq!(writes.len(), 3);
    for (id, value) in &writes {
        assert_eq!(value.as_str(), v.widgets().readout(*id).unwrap_or_default());
        assert_eq!(
            v.dispatch(ControlEvent::Input(*id), UpdateSource::Programmatic),
            Dispatch::Ignored
        );
    }
    assert_eq!(v.session().params.revision(), before + 1);
}

#[test]
fn events_are_ignored_while_guard_is_held() {
    let mut v = viewer();
    v.widgets_mut().edit(ControlId::CameraX, "3");
    let guard = v.guard().clone();
    {
        let _token = guard.hold();
        assert_eq!(guard.source_for_widget_event(), UpdateSource::Programmatic);
        assert_eq!(
            v.dispatch(ControlEvent::Input(ControlId::CameraX), UpdateSource::UserInput),
            Dispatch::Ignored
        );
    }
    assert!(!guard.is_held());
    assert_eq!(v.camera_position().x, 0.0);
}

#[test]
fn camera_slider_moves_camera_and_store() {
    let mut v = viewer();
    assert_eq!(user_edit(&mut v, ControlId::CameraX, "1.5"), Dispatch::Applied);
    assert_eq!(v.camera_position(), Vec3::new(1.5, 0.0, 5.0));
    assert_eq!(v.session().params.camera_position().x, 1.5);
    assert_eq!(v.widgets().readout(ControlId::CameraX), Some("1.50"));
}

#[test]
fn perspective_depth_slider_snaps_out_of_dead_zone() {
    let mut v = viewer();
    for (typed, expected) in [("0.1", 0.2), ("-0.1", -0.2), ("0", 0.2), ("-0.05", -0.2)] {
        user_edit(&mut v, ControlId::CameraZ, typed);
        assert_eq!(v.camera_position().z, expected, "typed {}", typed);
        assert_eq!(v.session().params.camera_position().z, expected);
        let shown = format!("{:.2}", expected);
        assert_eq!(v.widgets().value(ControlId::CameraZ), Some(shown.clone()));
        assert_eq!(v.widgets().readout(ControlId::CameraZ), Some(shown.as_str()));
    }
}

#[test]
fn orthographic_switch_keeps_position_and_allows_zero_depth() {
    let mut v = viewer();
    assert_eq!(
        user_edit(&mut v, ControlId::CameraSelect, "orthographic"),
        Dispatch::Applied
    );
    assert_eq!(v.session().cameras.active_kind(), CameraKind::Orthographic);
    assert_eq!(v.session().params.camera_kind(), CameraKind::Orthographic);
    assert_eq!(v.camera_position(), Vec3::new(0.0, 0.0, 5.0));

    user_edit(&mut v, ControlId::CameraZ, "0");
    assert_eq!(v.camera_position().z, 0.0);
    assert_eq!(v.session().params.camera_position().z, 0.0);
}

#[test]
fn switching_back_to_perspective_applies_dead_zone() {
    let mut v = viewer();
    user_edit(&mut v, ControlId::CameraSelect, "orthographic");
    user_edit(&mut v, ControlId::CameraZ, "0.1");
    assert_eq!(v.camera_position().z, 0.1);

    user_edit(&mut v, ControlId::CameraSelect, "perspective");
    assert_eq!(v.session().cameras.active_kind(), CameraKind::Perspective);
    assert_eq!(v.camera_position().z, 0.2);
    assert_eq!(v.session().params.camera_position().z, 0.2);
    assert_eq!(v.widgets().value(ControlId::CameraZ).as_deref(), Some("0.20"));
}

#[test]
fn colour_then_material_change_rebuilds_in_place() {
    let mut v = viewer();
    v.session_mut().advance_rotations().unwrap();
    let transform = v.session().dodecahedron().unwrap().transform;
    let nodes = v.session().scene.len();

    assert_eq!(user_edit(&mut v, ControlId::DodeColor, "#ff0000"), Dispatch::Applied);
    let mesh = v.session().dodecahedron().unwrap();
    assert_eq!(mesh.material.kind(), MaterialKind::Lambert);
    assert_eq!(mesh.material.color(), Rgb::new(255, 0, 0));

    assert_eq!(user_edit(&mut v, ControlId::MaterialSelect, "phong"), Dispatch::Applied);
    let mesh = v.session().dodecahedron().unwrap();
    assert_eq!(mesh.material.kind(), MaterialKind::Phong);
    assert_eq!(mesh.material.color(), Rgb::new(255, 0, 0));
    assert_eq!(mesh.transform, transform);
    assert_eq!(v.session().scene.len(), nodes);
}

#[test]
fn material_switched_away_and_back_keeps_colour_and_transform() {
    let mut v = viewer();
    assert_eq!(user_edit(&mut v, ControlId::DodeColor, "#ff8800"), Dispatch::Applied);
    for _ in 0..3 {
        v.session_mut().advance_rotations().unwrap();
    }
    let transform = v.session().dodecahedron().unwrap().transform;
    let nodes = v.session().scene.len();
    let color = Rgb::from_hex(0xff8800);

    assert_eq!(user_edit(&mut v, ControlId::MaterialSelect, "phong"), Dispatch::Applied);
    assert_eq!(user_edit(&mut v, ControlId::MaterialSelect, "lambert"), Dispatch::Applied);

    assert_eq!(v.session().params.dodecahedron_color(), color);
    assert_eq!(v.session().params.material_kind(), MaterialKind::Lambert);
    let mesh = v.session().dodecahedron().unwrap();
    assert_eq!(mesh.material.kind(), MaterialKind::Lambert);
    assert_eq!(mesh.material.color(), color);
    assert_eq!(mesh.transform, transform);
    assert_eq!(v.session().scene.len(), nodes);
    assert_eq!(v.widgets().value(ControlId::DodeColor).as_deref(), Some("#ff8800"));
}

#[test]
fn colour_picker_value_round_trips_through_store() {
    let mut v = viewer();
    user_edit(&mut v, ControlId::DodeColor, "#12ab34");
    assert_eq!(
        v.session().params.dodecahedron_color().to_hex_string(),
        "#12ab34"
    );
    user_edit(&mut v, ControlId::BoxColor, "#0000ff");
    assert_eq!(v.session().params.box_color(), Rgb::new(0, 0, 255));
    assert_eq!(
        v.session().slab().map(|m| m.material.color()),
        Some(Rgb::new(0, 0, 255))
    );
    assert_eq!(
        v.session().slab().map(|m| m.material.kind()),
        Some(MaterialKind::Basic)
    );
}

#[test]
fn bad_colour_is_ignored() {
    let mut v = viewer();
    assert_eq!(user_edit(&mut v, ControlId::DodeColor, "red"), Dispatch::Ignored);
    assert_eq!(
        v.session().params.dodecahedron_color().to_hex_string(),
        "#468585"
    );
}

#[test]
fn light_change_leaves_dodecahedron_alone() {
    let mut v = viewer();
    let dode_id = v.session().objects.dodecahedron;
    let material = v.session().dodecahedron().unwrap().material.clone();

    assert_eq!(user_edit(&mut v, ControlId::LightSelect, "point"), Dispatch::Applied);
    assert_eq!(v.session().light().map(|l| l.kind()), Some(LightKind::Point));
    assert_eq!(
        v.session().light().and_then(|l| l.position()),
        Some(Vec3::new(1.0, 1.0, 2.0))
    );
    assert_eq!(v.session().objects.dodecahedron, dode_id);
    assert_eq!(v.session().dodecahedron().unwrap().material, material);
    assert_eq!(v.widgets().value(ControlId::LightSelect).as_deref(), Some("point"));
    assert_eq!(v.widgets().value(ControlId::DodeColor).as_deref(), Some("#468585"));
}

#[test]
fn ambient_light_keeps_stored_position_for_later() {
    let mut v = viewer();
    user_edit(&mut v, ControlId::LightSelect, "ambient");
    assert_eq!(user_edit(&mut v, ControlId::LightX, "3"), Dispatch::Applied);
    assert_eq!(v.session().light().and_then(|l| l.position()), None);
    assert_eq!(v.session().params.light_position().x, 3.0);

    user_edit(&mut v, ControlId::LightSelect, "spot");
    assert_eq!(
        v.session().light().and_then(|l| l.position()),
        Some(Vec3::new(3.0, 1.0, 2.0))
    );
}

#[test]
fn unknown_material_tag_falls_back_to_lambert() {
    let mut v = viewer();
    user_edit(&mut v, ControlId::MaterialSelect, "standard");
    user_edit(&mut v, ControlId::MaterialSelect, "toon");
    assert_eq!(v.session().params.material_kind(), MaterialKind::Lambert);
    assert_eq!(
        v.session().dodecahedron().map(|m| m.material.kind()),
        Some(MaterialKind::Lambert)
    );
    assert_eq!(v.widgets().value(ControlId::MaterialSelect).as_deref(), Some("lambert"));
}

#[test]
fn position_sliders_move_meshes_in_plane() {
    let mut v = viewer();
    user_edit(&mut v, ControlId::BoxY, "-2");
    user_edit(&mut v, ControlId::DodeX, "0.5");
    assert_eq!(v.session().params.box_position(), Vec2::new(0.0, -2.0));
    assert_eq!(
        v.session().slab().map(|m| m.transform.position),
        Some(Vec3::new(0.0, -2.0, 0.0))
    );
    assert_eq!(
        v.session().dodecahedron().map(|m| m.transform.position),
        Some(Vec3::new(0.5, 0.0, 0.0))
    );
    assert_eq!(v.widgets().readout(ControlId::DodeX), Some("0.50"));
}

#[test]
fn speed_slider_updates_store_and_readout() {
    let mut v = viewer();
    assert_eq!(user_edit(&mut v, ControlId::DodeSpeedY, "0.05"), Dispatch::Applied);
    assert_eq!(v.session().params.dodecahedron_speed(), Vec2::new(0.01, 0.05));
    assert_eq!(v.widgets().readout(ControlId::DodeSpeedY), Some("0.05"));
}

#[test]
fn non_numeric_slider_value_is_ignored() {
    let mut v = viewer();
    let before = v.session().params.revision();
    assert_eq!(user_edit(&mut v, ControlId::CameraX, "abc"), Dispatch::Ignored);
    assert_eq!(v.camera_position(), Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(v.session().params.revision(), before);
}

#[test]
fn missing_widgets_are_skipped() {
    let mut v = Viewer::new(MemoryWidgets::empty(), Viewport::new(1280, 720, 1.0));
    assert!(!v.has_controls());
    v.init_controls();
    assert_eq!(
        v.dispatch(ControlEvent::Input(ControlId::CameraX), UpdateSource::UserInput),
        Dispatch::Ignored
    );
    assert_eq!(
        v.dispatch(ControlEvent::Change(ControlId::LightSelect), UpdateSource::UserInput),
        Dispatch::Ignored
    );
    // wheel and camera sync still reach the camera and store
    v.on_wheel(100.0);
    assert!((v.camera_position().z - 6.0).abs() < 1e-5);
    assert_eq!(v.session().params.camera_position(), v.camera_position());
}

#[test]
fn partial_panel_binds_what_exists() {
    let widgets = MemoryWidgets::with_controls(&[ControlId::CameraZ, ControlId::LightSelect]);
    let mut v = Viewer::new(widgets, Viewport::new(1280, 720, 1.0));
    v.init_controls();
    assert_eq!(v.widgets().value(ControlId::CameraX), None);
    assert_eq!(user_edit(&mut v, ControlId::CameraZ, "2"), Dispatch::Applied);
    assert_eq!(v.camera_position().z, 2.0);
}

#[test]
fn resize_updates_renderer_and_layout() {
    let mut v = viewer();
    let mut renderer = SizeRecorder::default();

    v.resize(Viewport::new(800, 600, 3.0), Some(&mut renderer));
    assert_eq!(renderer.size, Some((800, 600)));
    assert_eq!(renderer.ratio, Some(2.0));
    assert_eq!(v.widgets().panel_visible(Panel::Controls), Some(false));
    assert_eq!(v.widgets().panel_visible(Panel::MobileMessage), Some(true));

    v.resize(Viewport::new(1280, 720, 1.0), Some(&mut renderer));
    assert_eq!(renderer.ratio, Some(1.0));
    assert_eq!(v.widgets().panel_visible(Panel::Controls), Some(true));
    assert_eq!(v.widgets().panel_visible(Panel::MobileMessage), Some(false));

    let aspect = v.session().cameras.perspective.aspect;
    assert!((aspect - 1280.0 / 720.0).abs() < 1e-6);
}
