//! Render engine seam and the uniform layout shared with `scene.wgsl`.
//!
//! The core only packs scene state into plain-old-data blocks; the wgpu
//! backend (feature `gpu`) uploads and draws them.

use smallvec::SmallVec;

use crate::camera::SceneCamera;
use crate::params::{LightKind, MaterialKind};
use crate::scene::{Light, Material, Mesh, Scene};

#[cfg(feature = "gpu")]
pub mod gpu;
#[cfg(feature = "gpu")]
mod helpers;

/// Draws a scene from a camera onto some surface.
pub trait FrameRenderer {
    /// Logical (CSS) size of the drawing area.
    fn set_size(&mut self, width: u32, height: u32);
    /// Already capped device pixel ratio.
    fn set_pixel_ratio(&mut self, ratio: f64);
    fn render(&mut self, scene: &Scene, camera: &dyn SceneCamera) -> anyhow::Result<()>;
}

pub const MAX_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightPacked {
    /// xyz position, w light kind code
    pub position_kind: [f32; 4],
    /// linear rgb, w intensity
    pub color_intensity: [f32; 4],
    /// x spot cone cosine, y range (0 = unbounded)
    pub params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// x light count
    pub counts: [u32; 4],
    pub lights: [LightPacked; MAX_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub emissive: [f32; 4],
    /// x material kind code, y shininess, z roughness, w metalness
    pub material: [f32; 4],
}

#[inline]
pub fn light_code(kind: LightKind) -> f32 {
    match kind {
        LightKind::Spot => 0.0,
        LightKind::Directional => 1.0,
        LightKind::Point => 2.0,
        LightKind::Ambient => 3.0,
    }
}

#[inline]
pub fn material_code(kind: MaterialKind) -> f32 {
    match kind {
        MaterialKind::Lambert => 0.0,
        MaterialKind::Phong => 1.0,
        MaterialKind::Standard => 2.0,
        MaterialKind::Basic => 3.0,
    }
}

pub fn pack_light(light: &Light) -> LightPacked {
    let p = light.position().unwrap_or_default();
    let [r, g, b] = light.color().to_linear_f32();
    let params = match light {
        Light::Spot { angle, .. } => [angle.cos(), 0.0, 0.0, 0.0],
        Light::Point { range, .. } => [0.0, *range, 0.0, 0.0],
        Light::Directional { .. } | Light::Ambient { .. } => [0.0; 4],
    };
    LightPacked {
        position_kind: [p.x, p.y, p.z, light_code(light.kind())],
        color_intensity: [r, g, b, light.intensity()],
        params,
    }
}

pub fn pack_frame(scene: &Scene, camera: &dyn SceneCamera) -> FrameUniforms {
    let mut packed: SmallVec<[LightPacked; MAX_LIGHTS]> = SmallVec::new();
    for (id, light) in scene.lights() {
        if packed.len() == MAX_LIGHTS {
            log::debug!("light {} skipped, shader takes {}", id, MAX_LIGHTS);
            continue;
        }
        packed.push(pack_light(light));
    }
    let mut lights = [LightPacked::default(); MAX_LIGHTS];
    lights[..packed.len()].copy_from_slice(&packed);
    FrameUniforms {
        view_proj: camera.view_projection().to_cols_array_2d(),
        camera_pos: camera.position().extend(1.0).to_array(),
        counts: [packed.len() as u32, 0, 0, 0],
        lights,
    }
}

pub fn pack_object(mesh: &Mesh) -> ObjectUniforms {
    let model = mesh.transform.matrix();
    let normal = model.inverse().transpose();
    let material = &mesh.material;
    let [r, g, b] = material.color().to_linear_f32();
    let emissive = match material {
        Material::Lambert { emissive, .. } => emissive.to_linear_f32(),
        _ => [0.0; 3],
    };
    let (shininess, roughness, metalness) = match material {
        Material::Phong { shininess, .. } => (*shininess, 0.0, 0.0),
        Material::Standard {
            roughness,
            metalness,
            ..
        } => (0.0, *roughness, *metalness),
        Material::Lambert { .. } | Material::Basic { .. } => (0.0, 0.0, 0.0),
    };
    ObjectUniforms {
        model: model.to_cols_array_2d(),
        normal: normal.to_cols_array_2d(),
        color: [r, g, b, 1.0],
        emissive: [emissive[0], emissive[1], emissive[2], 0.0],
        material: [material_code(material.kind()), shininess, roughness, metalness],
    }
}

/// Backing-store size for a logical size at `pixel_ratio`, never zero.
#[inline]
pub fn physical_size(width: u32, height: u32, pixel_ratio: f64) -> (u32, u32) {
    let scale = |v: u32| ((v as f64 * pixel_ratio).round() as u32).max(1);
    (scale(width), scale(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraRig, Viewport};
    use crate::constants::ViewerDefaults;
    use crate::params::CameraKind;
    use crate::session::Session;
    use glam::Vec3;

    #[test]
    fn frame_packs_every_light_in_scene_order() {
        let session = Session::new(&ViewerDefaults::default(), Viewport::new(800, 600, 1.0));
        let frame = pack_frame(&session.scene, session.cameras.active());
        assert_eq!(frame.counts[0], 2);
        assert_eq!(frame.lights[0].position_kind, [1.0, 1.0, 2.0, 0.0]);
        assert_eq!(frame.lights[1].position_kind[3], light_code(LightKind::Ambient));
        assert_eq!(frame.camera_pos, [0.0, 0.0, 5.0, 1.0]);
    }

    #[test]
    fn spot_cone_is_stored_as_cosine() {
        let light = crate::factory::build_light(LightKind::Spot, Vec3::ONE);
        let packed = pack_light(&light);
        assert!((packed.params[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn object_carries_material_code_and_parameters() {
        let session = Session::new(&ViewerDefaults::default(), Viewport::new(800, 600, 1.0));
        let dode = session.dodecahedron().map(pack_object);
        let slab = session.slab().map(pack_object);
        assert_eq!(dode.map(|o| o.material[0]), Some(material_code(MaterialKind::Lambert)));
        assert_eq!(slab.map(|o| o.material[0]), Some(material_code(MaterialKind::Basic)));
        // slab sits at y = -1.2
        assert_eq!(slab.map(|o| o.model[3][1]), Some(-1.2));
    }

    #[test]
    fn physical_size_scales_and_never_collapses() {
        assert_eq!(physical_size(800, 600, 2.0), (1600, 1200));
        assert_eq!(physical_size(0, 0, 2.0), (1, 1));
        assert_eq!(physical_size(101, 51, 1.5), (152, 77));
    }

    #[test]
    fn orthographic_view_projection_keeps_origin_centred() {
        let rig = CameraRig::new(
            &Viewport::new(800, 600, 1.0),
            Vec3::new(0.0, 0.0, 5.0),
            CameraKind::Orthographic,
        );
        let p = rig.active().view_projection().project_point3(Vec3::ZERO);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
    }
}
