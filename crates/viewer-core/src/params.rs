//! Parameter store: the single source of truth for every adjustable value.
//!
//! Setters store values verbatim (camera depth validation lives in
//! [`crate::safety`]) and bump a revision counter so callers can observe
//! how many writes an interaction produced.

use glam::{Vec2, Vec3};

use crate::color::Rgb;
use crate::constants::ViewerDefaults;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CameraKind {
    #[default]
    Perspective,
    Orthographic,
}

impl CameraKind {
    /// Binary toggle: anything other than `"perspective"` selects orthographic.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "perspective" {
            CameraKind::Perspective
        } else {
            CameraKind::Orthographic
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            CameraKind::Perspective => "perspective",
            CameraKind::Orthographic => "orthographic",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CameraKind::Perspective => CameraKind::Orthographic,
            CameraKind::Orthographic => CameraKind::Perspective,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LightKind {
    #[default]
    Spot,
    Directional,
    Point,
    Ambient,
}

impl LightKind {
    pub const ALL: [LightKind; 4] = [
        LightKind::Spot,
        LightKind::Directional,
        LightKind::Point,
        LightKind::Ambient,
    ];

    /// Unrecognised tags resolve to [`LightKind::Spot`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "spot" => LightKind::Spot,
            "directional" => LightKind::Directional,
            "point" => LightKind::Point,
            "ambient" => LightKind::Ambient,
            other => {
                log::warn!("unknown light type {:?}, using spot", other);
                LightKind::Spot
            }
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            LightKind::Spot => "spot",
            LightKind::Directional => "directional",
            LightKind::Point => "point",
            LightKind::Ambient => "ambient",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MaterialKind {
    #[default]
    Lambert,
    Phong,
    Standard,
    Basic,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 4] = [
        MaterialKind::Lambert,
        MaterialKind::Phong,
        MaterialKind::Standard,
        MaterialKind::Basic,
    ];

    /// Unrecognised tags resolve to [`MaterialKind::Lambert`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "lambert" => MaterialKind::Lambert,
            "phong" => MaterialKind::Phong,
            "standard" => MaterialKind::Standard,
            "basic" => MaterialKind::Basic,
            other => {
                log::warn!("unknown material type {:?}, using lambert", other);
                MaterialKind::Lambert
            }
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            MaterialKind::Lambert => "lambert",
            MaterialKind::Phong => "phong",
            MaterialKind::Standard => "standard",
            MaterialKind::Basic => "basic",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraParams {
    pub position: Vec3,
    pub kind: CameraKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightParams {
    pub position: Vec3,
    pub kind: LightKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DodecahedronParams {
    pub position: Vec2,
    pub color: Rgb,
    pub speed: Vec2,
    pub material: MaterialKind,
}

/// The flat box under the dodecahedron.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxParams {
    pub position: Vec2,
    pub color: Rgb,
    pub speed_y: f32,
}

#[derive(Clone, Debug)]
pub struct ParameterSet {
    camera: CameraParams,
    light: LightParams,
    dodecahedron: DodecahedronParams,
    slab: BoxParams,
    revision: u64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::from_defaults(&ViewerDefaults::default())
    }
}

impl ParameterSet {
    pub fn from_defaults(d: &ViewerDefaults) -> Self {
        Self {
            camera: CameraParams {
                position: d.camera_position,
                kind: d.camera_kind,
            },
            light: LightParams {
                position: d.light_position,
                kind: d.light_kind,
            },
            dodecahedron: DodecahedronParams {
                position: d.dodecahedron_position,
                color: d.dodecahedron_color,
                speed: d.dodecahedron_speed,
                material: d.material_kind,
            },
            slab: BoxParams {
                position: d.box_position,
                color: d.box_color,
                speed_y: d.box_speed_y,
            },
            revision: 0,
        }
    }

    /// Number of writes performed since construction.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // ---------------- camera ----------------
    pub fn camera(&self) -> &CameraParams {
        &self.camera
    }
    pub fn camera_position(&self) -> Vec3 {
        self.camera.position
    }
    pub fn set_camera_position(&mut self, position: Vec3) {
        self.camera.position = position;
        self.touch();
    }
    pub fn set_camera_axis(&mut self, axis: Axis, value: f32) {
        self.camera.position[axis.index()] = value;
        self.touch();
    }
    pub fn camera_kind(&self) -> CameraKind {
        self.camera.kind
    }
    pub fn set_camera_kind(&mut self, kind: CameraKind) {
        self.camera.kind = kind;
        self.touch();
    }

    // ---------------- light ----------------
    pub fn light(&self) -> &LightParams {
        &self.light
    }
    pub fn light_position(&self) -> Vec3 {
        self.light.position
    }
    pub fn set_light_position(&mut self, position: Vec3) {
        self.light.position = position;
        self.touch();
    }
    pub fn set_light_axis(&mut self, axis: Axis, value: f32) {
        self.light.position[axis.index()] = value;
        self.touch();
    }
    pub fn light_kind(&self) -> LightKind {
        self.light.kind
    }
    pub fn set_light_kind(&mut self, kind: LightKind) {
        self.light.kind = kind;
        self.touch();
    }

    // ---------------- dodecahedron ----------------
    pub fn dodecahedron(&self) -> &DodecahedronParams {
        &self.dodecahedron
    }
    pub fn dodecahedron_position(&self) -> Vec2 {
        self.dodecahedron.position
    }
    pub fn set_dodecahedron_position(&mut self, position: Vec2) {
        self.dodecahedron.position = position;
        self.touch();
    }
    pub fn dodecahedron_color(&self) -> Rgb {
        self.dodecahedron.color
    }
    pub fn set_dodecahedron_color(&mut self, color: Rgb) {
        self.dodecahedron.color = color;
        self.touch();
    }
    pub fn dodecahedron_speed(&self) -> Vec2 {
        self.dodecahedron.speed
    }
    pub fn set_dodecahedron_speed_x(&mut self, speed: f32) {
        self.dodecahedron.speed.x = speed;
        self.touch();
    }
    pub fn set_dodecahedron_speed_y(&mut self, speed: f32) {
        self.dodecahedron.speed.y = speed;
        self.touch();
    }
    pub fn material_kind(&self) -> MaterialKind {
        self.dodecahedron.material
    }
    pub fn set_material_kind(&mut self, kind: MaterialKind) {
        self.dodecahedron.material = kind;
        self.touch();
    }

    // ---------------- box ----------------
    pub fn box_params(&self) -> &BoxParams {
        &self.slab
    }
    pub fn box_position(&self) -> Vec2 {
        self.slab.position
    }
    pub fn set_box_position(&mut self, position: Vec2) {
        self.slab.position = position;
        self.touch();
    }
    pub fn box_color(&self) -> Rgb {
        self.slab.color
    }
    pub fn set_box_color(&mut self, color: Rgb) {
        self.slab.color = color;
        self.touch();
    }
    pub fn box_speed_y(&self) -> f32 {
        self.slab.speed_y
    }
    pub fn set_box_speed_y(&mut self, speed: f32) {
        self.slab.speed_y = speed;
        self.touch();
    }
}
