//! Scene object factory: variant constructors and the rebuild operation.
//!
//! A rebuild removes the outgoing node, builds its replacement, copies the
//! outgoing transform onto it and inserts it again. Preconditions: the old id
//! is live and of the expected kind. Postconditions: transform preserved,
//! node count unchanged, geometry shared (never copied or mutated).

use glam::Vec3;

use crate::color::Rgb;
use crate::constants::{
    AMBIENT_INTENSITY, DIRECTIONAL_INTENSITY, LIGHT_COLOR, PHONG_SHININESS, POINT_INTENSITY,
    POINT_RANGE, SPOT_ANGLE_RADIANS, SPOT_INTENSITY, STANDARD_METALNESS, STANDARD_ROUGHNESS,
};
use crate::error::ViewerError;
use crate::params::{LightKind, MaterialKind};
use crate::scene::{Light, Material, Mesh, Node, NodeId, Scene};

pub fn build_material(kind: MaterialKind, color: Rgb) -> Material {
    match kind {
        MaterialKind::Lambert => Material::Lambert {
            color,
            emissive: color,
        },
        MaterialKind::Phong => Material::Phong {
            color,
            shininess: PHONG_SHININESS,
        },
        MaterialKind::Standard => Material::Standard {
            color,
            roughness: STANDARD_ROUGHNESS,
            metalness: STANDARD_METALNESS,
        },
        MaterialKind::Basic => Material::Basic { color },
    }
}

/// Build a light of `kind`. Ambient lights have no transform, so `position`
/// is only applied to the positional variants.
pub fn build_light(kind: LightKind, position: Vec3) -> Light {
    match kind {
        LightKind::Spot => Light::Spot {
            color: LIGHT_COLOR,
            intensity: SPOT_INTENSITY,
            angle: SPOT_ANGLE_RADIANS,
            position,
        },
        LightKind::Directional => Light::Directional {
            color: LIGHT_COLOR,
            intensity: DIRECTIONAL_INTENSITY,
            position,
        },
        LightKind::Point => Light::Point {
            color: LIGHT_COLOR,
            intensity: POINT_INTENSITY,
            range: POINT_RANGE,
            position,
        },
        LightKind::Ambient => Light::Ambient {
            color: LIGHT_COLOR,
            intensity: AMBIENT_INTENSITY,
        },
    }
}

/// Replace the mesh at `old` with one using `material`, keeping its geometry
/// and transform. Returns the id of the replacement.
pub fn rebuild_mesh(
    scene: &mut Scene,
    old: NodeId,
    material: Material,
) -> Result<NodeId, ViewerError> {
    if scene.mesh(old).is_none() {
        return Err(if scene.contains(old) {
            ViewerError::NotAMesh(old)
        } else {
            ViewerError::MissingNode(old)
        });
    }
    let Some(Node::Mesh(prior)) = scene.remove(old) else {
        return Err(ViewerError::MissingNode(old));
    };
    let transform = prior.transform;
    let mesh = Mesh {
        geometry: prior.geometry,
        material,
        transform,
    };
    let id = scene.add(Node::Mesh(mesh));
    log::debug!("rebuilt mesh {} -> {}", old, id);
    Ok(id)
}

/// Replace the light at `old` with `light`. Returns the id of the replacement.
pub fn rebuild_light(scene: &mut Scene, old: NodeId, light: Light) -> Result<NodeId, ViewerError> {
    if scene.light(old).is_none() {
        return Err(if scene.contains(old) {
            ViewerError::NotALight(old)
        } else {
            ViewerError::MissingNode(old)
        });
    }
    scene.remove(old);
    let id = scene.add(Node::Light(light));
    log::debug!("rebuilt light {} -> {}", old, id);
    Ok(id)
}
