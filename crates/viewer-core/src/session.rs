//! Session context: parameter store, scene graph, object handles, cameras
//! and orbit control for one viewer instance.

use std::rc::Rc;

use glam::{Vec2, Vec3};

use crate::camera::{CameraRig, Viewport};
use crate::constants::{
    ViewerDefaults, BACKGROUND_COLOR, BOX_SIZE, DODECAHEDRON_RADIUS, FILL_LIGHT_COLOR,
    FILL_LIGHT_INTENSITY,
};
use crate::error::ViewerError;
use crate::factory;
use crate::geometry::Geometry;
use crate::orbit::OrbitControls;
use crate::params::{Axis, MaterialKind, ParameterSet};
use crate::safety;
use crate::scene::{Light, Mesh, Node, NodeId, Scene, Transform};

/// Handles to the fixed object set. Rebuilds swap the ids in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneObjects {
    pub dodecahedron: NodeId,
    pub slab: NodeId,
    pub light: NodeId,
    /// Static ambient fill, never reconfigured.
    pub fill_light: NodeId,
}

pub struct Session {
    pub params: ParameterSet,
    pub scene: Scene,
    pub objects: SceneObjects,
    pub cameras: CameraRig,
    pub orbit: OrbitControls,
    pub viewport: Viewport,
}

impl Session {
    pub fn new(defaults: &ViewerDefaults, viewport: Viewport) -> Self {
        let params = ParameterSet::from_defaults(defaults);
        let mut scene = Scene::new(BACKGROUND_COLOR);

        let dodecahedron_geometry = Rc::new(Geometry::dodecahedron(DODECAHEDRON_RADIUS));
        let box_geometry = Rc::new(Geometry::cuboid(BOX_SIZE[0], BOX_SIZE[1], BOX_SIZE[2]));

        let dode = params.dodecahedron();
        let dodecahedron = scene.add(Node::Mesh(Mesh {
            geometry: dodecahedron_geometry,
            material: factory::build_material(dode.material, dode.color),
            transform: Transform::at(dode.position.extend(0.0)),
        }));
        let slab_params = params.box_params();
        let slab = scene.add(Node::Mesh(Mesh {
            geometry: box_geometry,
            material: factory::build_material(MaterialKind::Basic, slab_params.color),
            transform: Transform::at(slab_params.position.extend(0.0)),
        }));
        let light = scene.add(Node::Light(factory::build_light(
            params.light_kind(),
            params.light_position(),
        )));
        let fill_light = scene.add(Node::Light(Light::Ambient {
            color: FILL_LIGHT_COLOR,
            intensity: FILL_LIGHT_INTENSITY,
        }));

        let camera_kind = params.camera_kind();
        let mut cameras = CameraRig::new(&viewport, params.camera_position(), camera_kind);
        let orbit = OrbitControls::new(Vec3::ZERO);
        cameras.active_mut().look_at(orbit.target);

        Self {
            params,
            scene,
            objects: SceneObjects {
                dodecahedron,
                slab,
                light,
                fill_light,
            },
            cameras,
            orbit,
            viewport,
        }
    }

    pub fn dodecahedron(&self) -> Option<&Mesh> {
        self.scene.mesh(self.objects.dodecahedron)
    }

    pub fn slab(&self) -> Option<&Mesh> {
        self.scene.mesh(self.objects.slab)
    }

    pub fn light(&self) -> Option<&Light> {
        self.scene.light(self.objects.light)
    }

    /// Rebuild the dodecahedron with the stored material kind and colour.
    pub fn rebuild_dodecahedron_material(&mut self) -> Result<(), ViewerError> {
        let material = factory::build_material(
            self.params.material_kind(),
            self.params.dodecahedron_color(),
        );
        self.objects.dodecahedron =
            factory::rebuild_mesh(&mut self.scene, self.objects.dodecahedron, material)?;
        Ok(())
    }

    /// Rebuild the box with a basic material of the stored colour.
    pub fn rebuild_box_material(&mut self) -> Result<(), ViewerError> {
        let material = factory::build_material(
            MaterialKind::Basic,
            self.params.box_color(),
        );
        self.objects.slab = factory::rebuild_mesh(&mut self.scene, self.objects.slab, material)?;
        Ok(())
    }

    /// Rebuild the reconfigurable light with the stored kind and position.
    pub fn rebuild_light(&mut self) -> Result<(), ViewerError> {
        let light = factory::build_light(self.params.light_kind(), self.params.light_position());
        self.objects.light = factory::rebuild_light(&mut self.scene, self.objects.light, light)?;
        Ok(())
    }

    /// Move the light in place. Ambient lights have no position to move.
    pub fn apply_light_position(&mut self) -> Result<bool, ViewerError> {
        let position = self.params.light_position();
        let id = self.objects.light;
        let light = self
            .scene
            .light_mut(id)
            .ok_or(ViewerError::MissingNode(id))?;
        Ok(light.set_position(position))
    }

    /// Move both meshes to their stored x/y, keeping z and rotation.
    pub fn apply_object_positions(&mut self) -> Result<(), ViewerError> {
        let placements = [
            (self.objects.dodecahedron, self.params.dodecahedron_position()),
            (self.objects.slab, self.params.box_position()),
        ];
        for (id, xy) in placements {
            let mesh = self
                .scene
                .mesh_mut(id)
                .ok_or(ViewerError::MissingNode(id))?;
            set_xy(&mut mesh.transform, xy);
        }
        Ok(())
    }

    /// Put the active camera at the stored position, as-is.
    pub fn apply_camera_position(&mut self) {
        let position = self.params.camera_position();
        self.cameras.active_mut().set_position(position);
    }

    /// Run the dead-zone clamp on the active camera. Returns the corrected
    /// depth when a snap happened.
    pub fn enforce_camera_safety(&mut self) -> Option<f32> {
        let kind = self.cameras.active_kind();
        let cam = self.cameras.active_mut();
        let mut position = cam.position();
        if !safety::needs_clamp(position.z, kind) {
            return None;
        }
        position.z = safety::clamp_depth(position.z, kind);
        cam.set_position(position);
        self.params.set_camera_axis(Axis::Z, position.z);
        Some(position.z)
    }

    /// Advance mesh rotations by the stored speeds.
    pub fn advance_rotations(&mut self) -> Result<(), ViewerError> {
        let dode_speed = self.params.dodecahedron_speed();
        let box_speed = self.params.box_speed_y();

        let id = self.objects.dodecahedron;
        let dode = self
            .scene
            .mesh_mut(id)
            .ok_or(ViewerError::MissingNode(id))?;
        dode.transform.rotation.x += dode_speed.x;
        dode.transform.rotation.y += dode_speed.y;

        let id = self.objects.slab;
        let slab = self
            .scene
            .mesh_mut(id)
            .ok_or(ViewerError::MissingNode(id))?;
        slab.transform.rotation.y += box_speed;
        Ok(())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.cameras.set_viewport(&viewport);
    }
}

#[inline]
fn set_xy(transform: &mut Transform, xy: Vec2) {
    transform.position.x = xy.x;
    transform.position.y = xy.y;
}
