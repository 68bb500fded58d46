use glam::{Vec2, Vec3};

use crate::color::Rgb;
use crate::params::{CameraKind, LightKind, MaterialKind};

// Shared scene/tuning constants used by both web and native frontends.

// Startup parameter values
pub const DEFAULT_CAMERA_POSITION: [f32; 3] = [0.0, 0.0, 5.0];
pub const DEFAULT_LIGHT_POSITION: [f32; 3] = [1.0, 1.0, 2.0];
pub const DEFAULT_DODECAHEDRON_POSITION: [f32; 2] = [0.0, 0.0];
pub const DEFAULT_DODECAHEDRON_COLOR: Rgb = Rgb::from_hex(0x468585);
pub const DEFAULT_DODECAHEDRON_SPEED: [f32; 2] = [0.01, 0.01];
pub const DEFAULT_BOX_POSITION: [f32; 2] = [0.0, -1.2];
pub const DEFAULT_BOX_COLOR: Rgb = Rgb::from_hex(0xb4b4b3);
pub const DEFAULT_BOX_SPEED_Y: f32 = 0.005;

// Scene dressing
pub const BACKGROUND_COLOR: Rgb = Rgb::from_hex(0xc0f0f0);
pub const DODECAHEDRON_RADIUS: f32 = 1.0;
pub const BOX_SIZE: [f32; 3] = [2.0, 0.1, 2.0];

// Projections
pub const PERSPECTIVE_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const ORTHO_HALF_HEIGHT: f32 = 5.0; // frustum is (-5a, 5a, 5, -5)

// Lights
pub const LIGHT_COLOR: Rgb = Rgb::from_hex(0x006769);
pub const SPOT_INTENSITY: f32 = 100.0;
pub const SPOT_ANGLE_RADIANS: f32 = std::f32::consts::FRAC_PI_3;
pub const DIRECTIONAL_INTENSITY: f32 = 2.0;
pub const POINT_INTENSITY: f32 = 2.0;
pub const POINT_RANGE: f32 = 100.0;
pub const AMBIENT_INTENSITY: f32 = 1.0;
pub const FILL_LIGHT_COLOR: Rgb = Rgb::from_hex(0x404040);
pub const FILL_LIGHT_INTENSITY: f32 = 0.5;

// Materials
pub const PHONG_SHININESS: f32 = 100.0;
pub const STANDARD_ROUGHNESS: f32 = 0.5;
pub const STANDARD_METALNESS: f32 = 0.5;

// Camera safety
pub const MIN_PERSPECTIVE_DEPTH: f32 = 0.2; // dead zone is (-0.2, 0.2)
pub const ZOOM_DEPTH_MIN: f32 = -10.0;
pub const ZOOM_DEPTH_MAX: f32 = 20.0;
pub const WHEEL_DEPTH_PER_PIXEL: f32 = 0.01;

// Renderer / viewport
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const CONTROLS_BREAKPOINT_PX: u32 = 1000; // controls hidden at or below this width

// Orbit control
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;

/// Everything needed to build a fresh session.
#[derive(Clone, Debug)]
pub struct ViewerDefaults {
    pub camera_position: Vec3,
    pub camera_kind: CameraKind,
    pub light_position: Vec3,
    pub light_kind: LightKind,
    pub dodecahedron_position: Vec2,
    pub dodecahedron_color: Rgb,
    pub dodecahedron_speed: Vec2,
    pub material_kind: MaterialKind,
    pub box_position: Vec2,
    pub box_color: Rgb,
    pub box_speed_y: f32,
}

impl Default for ViewerDefaults {
    fn default() -> Self {
        Self {
            camera_position: Vec3::from(DEFAULT_CAMERA_POSITION),
            camera_kind: CameraKind::Perspective,
            light_position: Vec3::from(DEFAULT_LIGHT_POSITION),
            light_kind: LightKind::Spot,
            dodecahedron_position: Vec2::from(DEFAULT_DODECAHEDRON_POSITION),
            dodecahedron_color: DEFAULT_DODECAHEDRON_COLOR,
            dodecahedron_speed: Vec2::from(DEFAULT_DODECAHEDRON_SPEED),
            material_kind: MaterialKind::Lambert,
            box_position: Vec2::from(DEFAULT_BOX_POSITION),
            box_color: DEFAULT_BOX_COLOR,
            box_speed_y: DEFAULT_BOX_SPEED_Y,
        }
    }
}
