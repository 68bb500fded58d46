//! The two camera projections and the rig that swaps between them.
//!
//! Both cameras live for the whole session. Switching projections copies the
//! outgoing camera's position (and aim) onto the incoming one, so the swap is
//! cheap and reversible.

use glam::{Mat4, Vec3};

use crate::constants::{CAMERA_FAR, CAMERA_NEAR, ORTHO_HALF_HEIGHT, PERSPECTIVE_FOV_DEGREES};
use crate::params::CameraKind;

/// Render target size in CSS/logical pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Camera surface the renderer and orbit control consume.
pub trait SceneCamera {
    fn kind(&self) -> CameraKind;
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn target(&self) -> Vec3;
    fn look_at(&mut self, target: Vec3);
    fn projection_matrix(&self) -> Mat4;

    fn view_matrix(&self) -> Mat4 {
        view_towards(self.position(), self.target())
    }

    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Right-handed look-at that stays finite when the eye sits on the target
/// or straight above/below it.
pub fn view_towards(eye: Vec3, target: Vec3) -> Mat4 {
    let forward = target - eye;
    let forward = if forward.length_squared() < 1e-12 {
        Vec3::NEG_Z
    } else {
        forward.normalize()
    };
    let up = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    Mat4::look_to_rh(eye, forward, up)
}

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            fov_y_degrees: PERSPECTIVE_FOV_DEGREES,
            aspect,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl SceneCamera for PerspectiveCamera {
    fn kind(&self) -> CameraKind {
        CameraKind::Perspective
    }
    fn position(&self) -> Vec3 {
        self.position
    }
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
    fn target(&self) -> Vec3 {
        self.target
    }
    fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrthographicCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthographicCamera {
    pub fn new(aspect: f32) -> Self {
        let mut cam = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        };
        cam.set_aspect(aspect);
        cam
    }

    /// Frustum `(-h*a, h*a, h, -h)` with `h = ORTHO_HALF_HEIGHT`.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.left = -ORTHO_HALF_HEIGHT * aspect;
        self.right = ORTHO_HALF_HEIGHT * aspect;
        self.top = ORTHO_HALF_HEIGHT;
        self.bottom = -ORTHO_HALF_HEIGHT;
    }
}

impl SceneCamera for OrthographicCamera {
    fn kind(&self) -> CameraKind {
        CameraKind::Orthographic
    }
    fn position(&self) -> Vec3 {
        self.position
    }
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
    fn target(&self) -> Vec3 {
        self.target
    }
    fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
    fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

pub struct CameraRig {
    pub perspective: PerspectiveCamera,
    pub orthographic: OrthographicCamera,
    active: CameraKind,
}

impl CameraRig {
    pub fn new(viewport: &Viewport, position: Vec3, active: CameraKind) -> Self {
        let aspect = viewport.aspect();
        let mut perspective = PerspectiveCamera::new(aspect);
        let mut orthographic = OrthographicCamera::new(aspect);
        perspective.position = position;
        orthographic.position = position;
        Self {
            perspective,
            orthographic,
            active,
        }
    }

    #[inline]
    pub fn active_kind(&self) -> CameraKind {
        self.active
    }

    pub fn active(&self) -> &dyn SceneCamera {
        match self.active {
            CameraKind::Perspective => &self.perspective,
            CameraKind::Orthographic => &self.orthographic,
        }
    }

    pub fn active_mut(&mut self) -> &mut dyn SceneCamera {
        match self.active {
            CameraKind::Perspective => &mut self.perspective,
            CameraKind::Orthographic => &mut self.orthographic,
        }
    }

    /// Make `kind` the active camera, carrying over the previous camera's
    /// position and aim. Returns the carried position.
    pub fn switch_to(&mut self, kind: CameraKind) -> Vec3 {
        let prev_pos = self.active().position();
        let prev_target = self.active().target();
        self.active = kind;
        let cam = self.active_mut();
        cam.set_position(prev_pos);
        cam.look_at(prev_target);
        prev_pos
    }

    /// Recompute both projections for a new viewport.
    pub fn set_viewport(&mut self, viewport: &Viewport) {
        let aspect = viewport.aspect();
        self.perspective.aspect = aspect;
        self.orthographic.set_aspect(aspect);
    }
}
