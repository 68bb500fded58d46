//! Control binding layer: two-way sync between widgets and the session.
//!
//! Widget events enter through [`Viewer::dispatch`] tagged with an
//! [`UpdateSource`]. Programmatic widget writes happen while a
//! [`ReentrancyGuard`] token is held; events that are tagged programmatic or
//! arrive while the guard is held are ignored, so a write can never re-trigger
//! the handler that produced it.

use std::cell::Cell;
use std::rc::Rc;

use glam::{Vec2, Vec3};

use crate::camera::{SceneCamera, Viewport};
use crate::color::Rgb;
use crate::constants::{ViewerDefaults, MAX_PIXEL_RATIO, WHEEL_DEPTH_PER_PIXEL};
use crate::controls::{format_readout, parse_number, ControlId, Panel, Widgets};
use crate::error::ViewerError;
use crate::layout;
use crate::params::{Axis, CameraKind, LightKind, MaterialKind};
use crate::render::FrameRenderer;
use crate::safety;
use crate::session::Session;

/// Where an update originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateSource {
    UserInput,
    Programmatic,
    AnimationTick,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlEvent {
    /// `input` event on a slider or colour picker.
    Input(ControlId),
    /// `change` event on a selector.
    Change(ControlId),
    /// Wheel over the canvas, `delta_y` in pixels.
    Wheel { delta_y: f32 },
    /// The orbit control moved the active camera.
    CameraMoved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    Ignored,
    Failed,
}

/// Shared scoped flag marking programmatic widget writes.
///
/// Clones share the same state so event listeners can check it without
/// borrowing the viewer.
#[derive(Clone, Debug, Default)]
pub struct ReentrancyGuard {
    depth: Rc<Cell<u32>>,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.depth.get() > 0
    }

    /// Hold the guard until the returned token is dropped.
    pub fn hold(&self) -> GuardToken {
        self.depth.set(self.depth.get() + 1);
        GuardToken {
            depth: self.depth.clone(),
        }
    }

    /// Tag for an event arriving from a widget right now.
    #[inline]
    pub fn source_for_widget_event(&self) -> UpdateSource {
        if self.is_held() {
            UpdateSource::Programmatic
        } else {
            UpdateSource::UserInput
        }
    }
}

#[must_use = "the guard is released when the token is dropped"]
pub struct GuardToken {
    depth: Rc<Cell<u32>>,
}

impl Drop for GuardToken {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

pub struct Viewer<W: Widgets> {
    session: Session,
    widgets: W,
    guard: ReentrancyGuard,
}

impl<W: Widgets> Viewer<W> {
    pub fn new(widgets: W, viewport: Viewport) -> Self {
        Self::with_defaults(widgets, viewport, &ViewerDefaults::default())
    }

    pub fn with_defaults(widgets: W, viewport: Viewport, defaults: &ViewerDefaults) -> Self {
        Self {
            session: Session::new(defaults, viewport),
            widgets,
            guard: ReentrancyGuard::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn widgets(&self) -> &W {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut W {
        &mut self.widgets
    }

    pub fn guard(&self) -> &ReentrancyGuard {
        &self.guard
    }

    /// Whether the page carries a control panel worth binding.
    pub fn has_controls(&self) -> bool {
        self.widgets.panel_exists(Panel::Controls)
    }

    /// Write every stored value into its widget and readout.
    pub fn init_controls(&mut self) {
        let _token = self.guard.hold();
        let p = &self.session.params;
        let camera = p.camera_position();
        let light = p.light_position();
        let dode = p.dodecahedron().clone();
        let slab = p.box_params().clone();
        let camera_kind = p.camera_kind();
        let light_kind = p.light_kind();
        let sliders = [
            (ControlId::CameraX, camera.x),
            (ControlId::CameraY, camera.y),
            (ControlId::CameraZ, camera.z),
            (ControlId::LightX, light.x),
            (ControlId::LightY, light.y),
            (ControlId::LightZ, light.z),
            (ControlId::DodeX, dode.position.x),
            (ControlId::DodeY, dode.position.y),
            (ControlId::DodeSpeedX, dode.speed.x),
            (ControlId::DodeSpeedY, dode.speed.y),
            (ControlId::BoxX, slab.position.x),
            (ControlId::BoxY, slab.position.y),
            (ControlId::BoxSpeedY, slab.speed_y),
        ];
        for (id, value) in sliders {
            // speeds need more precision than the readout shows
            self.widgets.set_value(id, &value.to_string());
            self.widgets.set_readout(id, &format_readout(value));
        }
        self.widgets
            .set_value(ControlId::DodeColor, &dode.color.to_hex_string());
        self.widgets
            .set_value(ControlId::BoxColor, &slab.color.to_hex_string());
        self.widgets
            .set_value(ControlId::CameraSelect, camera_kind.as_tag());
        self.widgets
            .set_value(ControlId::MaterialSelect, dode.material.as_tag());
        self.widgets
            .set_value(ControlId::LightSelect, light_kind.as_tag());
    }

    /// Entry point for every widget/input event.
    pub fn dispatch(&mut self, event: ControlEvent, source: UpdateSource) -> Dispatch {
        if source == UpdateSource::Programmatic || self.guard.is_held() {
            log::trace!("ignoring {:?} from {:?}", event, source);
            return Dispatch::Ignored;
        }
        let result = match event {
            ControlEvent::Input(id) => self.on_input(id),
            ControlEvent::Change(id) => self.on_change(id),
            ControlEvent::Wheel { delta_y } => {
                self.on_wheel(delta_y);
                Ok(true)
            }
            ControlEvent::CameraMoved => Ok(self.sync_controls_from_camera()),
        };
        match result {
            Ok(true) => Dispatch::Applied,
            Ok(false) => Dispatch::Ignored,
            Err(e) => {
                log::warn!("{:?} handler failed: {}", event, e);
                Dispatch::Failed
            }
        }
    }

    fn on_input(&mut self, id: ControlId) -> Result<bool, ViewerError> {
        match id {
            ControlId::CameraX | ControlId::CameraY | ControlId::CameraZ => {
                let Some(value) = self.read_number(id) else {
                    return Ok(false);
                };
                let axis = match id {
                    ControlId::CameraX => Axis::X,
                    ControlId::CameraY => Axis::Y,
                    _ => Axis::Z,
                };
                self.session.params.set_camera_axis(axis, value);
                self.session.apply_camera_position();
                self.write_readout(id, value);
                if axis == Axis::Z {
                    self.apply_camera_safety();
                }
                Ok(true)
            }
            ControlId::LightX | ControlId::LightY | ControlId::LightZ => {
                let Some(value) = self.read_number(id) else {
                    return Ok(false);
                };
                let axis = match id {
                    ControlId::LightX => Axis::X,
                    ControlId::LightY => Axis::Y,
                    _ => Axis::Z,
                };
                self.session.params.set_light_axis(axis, value);
                self.session.apply_light_position()?;
                self.write_readout(id, value);
                Ok(true)
            }
            ControlId::DodeX | ControlId::DodeY | ControlId::BoxX | ControlId::BoxY => {
                let Some(value) = self.read_number(id) else {
                    return Ok(false);
                };
                let params = &mut self.session.params;
                match id {
                    ControlId::DodeX => {
                        let p = params.dodecahedron_position();
                        params.set_dodecahedron_position(Vec2::new(value, p.y));
                    }
                    ControlId::DodeY => {
                        let p = params.dodecahedron_position();
                        params.set_dodecahedron_position(Vec2::new(p.x, value));
                    }
                    ControlId::BoxX => {
                        let p = params.box_position();
                        params.set_box_position(Vec2::new(value, p.y));
                    }
                    _ => {
                        let p = params.box_position();
                        params.set_box_position(Vec2::new(p.x, value));
                    }
                }
                self.session.apply_object_positions()?;
                self.write_readout(id, value);
                Ok(true)
            }
            ControlId::DodeSpeedX | ControlId::DodeSpeedY | ControlId::BoxSpeedY => {
                // takes effect on the next animation tick
                let Some(value) = self.read_number(id) else {
                    return Ok(false);
                };
                let params = &mut self.session.params;
                match id {
                    ControlId::DodeSpeedX => params.set_dodecahedron_speed_x(value),
                    ControlId::DodeSpeedY => params.set_dodecahedron_speed_y(value),
                    _ => params.set_box_speed_y(value),
                }
                self.write_readout(id, value);
                Ok(true)
            }
            ControlId::DodeColor => {
                let Some(color) = self.read_color(id) else {
                    return Ok(false);
                };
                self.session.params.set_dodecahedron_color(color);
                self.session.rebuild_dodecahedron_material()?;
                self.sync_material_select();
                Ok(true)
            }
            ControlId::BoxColor => {
                let Some(color) = self.read_color(id) else {
                    return Ok(false);
                };
                self.session.params.set_box_color(color);
                self.session.rebuild_box_material()?;
                Ok(true)
            }
            ControlId::CameraSelect | ControlId::MaterialSelect | ControlId::LightSelect => {
                Ok(false)
            }
        }
    }

    fn on_change(&mut self, id: ControlId) -> Result<bool, ViewerError> {
        match id {
            ControlId::CameraSelect => {
                let Some(tag) = self.widgets.value(id) else {
                    return Ok(false);
                };
                self.switch_camera(CameraKind::from_tag(&tag));
                Ok(true)
            }
            ControlId::MaterialSelect => {
                let Some(tag) = self.widgets.value(id) else {
                    return Ok(false);
                };
                self.session
                    .params
                    .set_material_kind(MaterialKind::from_tag(&tag));
                self.session.rebuild_dodecahedron_material()?;
                self.sync_material_select();
                Ok(true)
            }
            ControlId::LightSelect => {
                let Some(tag) = self.widgets.value(id) else {
                    return Ok(false);
                };
                self.session.params.set_light_kind(LightKind::from_tag(&tag));
                self.session.rebuild_light()?;
                self.sync_light_select();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Swap the active projection, carrying the camera position across, then
    /// run the depth clamp on the new camera.
    pub fn switch_camera(&mut self, kind: CameraKind) {
        let orbit_target = self.session.orbit.target;
        self.session.cameras.switch_to(kind);
        self.session.cameras.active_mut().look_at(orbit_target);
        self.session.params.set_camera_kind(kind);
        log::info!("active camera: {}", kind.as_tag());
        self.apply_camera_safety();
    }

    /// Wheel zoom: depth-only move bounded to the zoom range, then the
    /// perspective dead zone, then a slider resync.
    pub fn on_wheel(&mut self, delta_y: f32) {
        let kind = self.session.cameras.active_kind();
        let cam = self.session.cameras.active_mut();
        let mut position = cam.position();
        position.z = safety::zoom_depth(position.z, delta_y * WHEEL_DEPTH_PER_PIXEL, kind);
        cam.set_position(position);
        self.sync_controls_from_camera();
    }

    /// Copy the live camera position into the store and the camera sliders.
    /// Returns false when called during a programmatic write.
    pub fn sync_controls_from_camera(&mut self) -> bool {
        if self.guard.is_held() {
            return false;
        }
        let position = self.session.cameras.active().position();
        self.session.params.set_camera_position(position);
        let _token = self.guard.hold();
        for (id, value) in [
            (ControlId::CameraX, position.x),
            (ControlId::CameraY, position.y),
            (ControlId::CameraZ, position.z),
        ] {
            let text = format_readout(value);
            self.widgets.set_value(id, &text);
            self.widgets.set_readout(id, &text);
        }
        true
    }

    /// Recompute projections, renderer size and panel visibility together.
    pub fn resize(&mut self, viewport: Viewport, renderer: Option<&mut dyn FrameRenderer>) {
        self.session.set_viewport(viewport);
        if let Some(r) = renderer {
            r.set_pixel_ratio(viewport.pixel_ratio.min(MAX_PIXEL_RATIO));
            r.set_size(viewport.width, viewport.height);
        }
        self.apply_responsive_layout(viewport.width);
    }

    pub fn apply_responsive_layout(&mut self, width: u32) {
        let show_controls = layout::controls_visible(width);
        self.widgets
            .set_panel_visible(Panel::Controls, show_controls);
        self.widgets
            .set_panel_visible(Panel::MobileMessage, !show_controls);
    }

    /// Active camera position, as rendered.
    pub fn camera_position(&self) -> Vec3 {
        self.session.cameras.active().position()
    }

    fn apply_camera_safety(&mut self) {
        if let Some(z) = self.session.enforce_camera_safety() {
            log::debug!("camera depth snapped to {}", z);
            let _token = self.guard.hold();
            let text = format_readout(z);
            self.widgets.set_value(ControlId::CameraZ, &text);
            self.widgets.set_readout(ControlId::CameraZ, &text);
        }
    }

    fn sync_material_select(&mut self) {
        let _token = self.guard.hold();
        let tag = self.session.params.material_kind().as_tag();
        self.widgets.set_value(ControlId::MaterialSelect, tag);
    }

    fn sync_light_select(&mut self) {
        let _token = self.guard.hold();
        let tag = self.session.params.light_kind().as_tag();
        let color = self.session.params.dodecahedron_color().to_hex_string();
        self.widgets.set_value(ControlId::LightSelect, tag);
        self.widgets.set_value(ControlId::DodeColor, &color);
    }

    fn write_readout(&mut self, id: ControlId, value: f32) {
        let _token = self.guard.hold();
        self.widgets.set_readout(id, &format_readout(value));
    }

    fn read_number(&self, id: ControlId) -> Option<f32> {
        let text = self.widgets.value(id)?;
        let value = parse_number(&text);
        if value.is_none() {
            log::warn!("ignoring non-numeric {} value {:?}", id.element_id(), text);
        }
        value
    }

    fn read_color(&self, id: ControlId) -> Option<Rgb> {
        let text = self.widgets.value(id)?;
        match text.parse::<Rgb>() {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("ignoring {} value: {}", id.element_id(), e);
                None
            }
        }
    }
}
