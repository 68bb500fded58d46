//! Retained scene graph consumed by the renderer.
//!
//! Nodes are meshes or lights addressed by [`NodeId`]. Ids are never reused,
//! so a stale handle held across a rebuild simply stops resolving.

use std::fmt;
use std::rc::Rc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::color::Rgb;
use crate::geometry::Geometry;
use crate::params::{LightKind, MaterialKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position plus XYZ Euler rotation in radians. Angles accumulate without
/// normalisation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_rotation_translation(q, self.position)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    Lambert { color: Rgb, emissive: Rgb },
    Phong { color: Rgb, shininess: f32 },
    Standard { color: Rgb, roughness: f32, metalness: f32 },
    Basic { color: Rgb },
}

impl Material {
    pub fn kind(&self) -> MaterialKind {
        match self {
            Material::Lambert { .. } => MaterialKind::Lambert,
            Material::Phong { .. } => MaterialKind::Phong,
            Material::Standard { .. } => MaterialKind::Standard,
            Material::Basic { .. } => MaterialKind::Basic,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Material::Lambert { color, .. }
            | Material::Phong { color, .. }
            | Material::Standard { color, .. }
            | Material::Basic { color } => *color,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Light {
    /// Cone light aimed at the origin.
    Spot {
        color: Rgb,
        intensity: f32,
        angle: f32,
        position: Vec3,
    },
    /// Parallel rays travelling from `position` towards the origin.
    Directional {
        color: Rgb,
        intensity: f32,
        position: Vec3,
    },
    Point {
        color: Rgb,
        intensity: f32,
        range: f32,
        position: Vec3,
    },
    /// Scene-wide scalar term with no transform.
    Ambient { color: Rgb, intensity: f32 },
}

impl Light {
    pub fn kind(&self) -> LightKind {
        match self {
            Light::Spot { .. } => LightKind::Spot,
            Light::Directional { .. } => LightKind::Directional,
            Light::Point { .. } => LightKind::Point,
            Light::Ambient { .. } => LightKind::Ambient,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Light::Spot { color, .. }
            | Light::Directional { color, .. }
            | Light::Point { color, .. }
            | Light::Ambient { color, .. } => *color,
        }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Light::Spot { intensity, .. }
            | Light::Directional { intensity, .. }
            | Light::Point { intensity, .. }
            | Light::Ambient { intensity, .. } => *intensity,
        }
    }

    pub fn position(&self) -> Option<Vec3> {
        match self {
            Light::Spot { position, .. }
            | Light::Directional { position, .. }
            | Light::Point { position, .. } => Some(*position),
            Light::Ambient { .. } => None,
        }
    }

    /// Move a positional light. Returns false (and does nothing) for ambient.
    pub fn set_position(&mut self, new_position: Vec3) -> bool {
        match self {
            Light::Spot { position, .. }
            | Light::Directional { position, .. }
            | Light::Point { position, .. } => {
                *position = new_position;
                true
            }
            Light::Ambient { .. } => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: Rc<Geometry>,
    pub material: Material,
    pub transform: Transform,
}

#[derive(Clone, Debug)]
pub enum Node {
    Mesh(Mesh),
    Light(Light),
}

pub struct Scene {
    pub background: Rgb,
    nodes: Vec<(NodeId, Node)>,
    next_id: u32,
}

impl Scene {
    pub fn new(background: Rgb) -> Self {
        Self {
            background,
            nodes: Vec::new(),
            next_id: 0,
        }
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push((id, node));
        id
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.nodes.iter().position(|(nid, _)| *nid == id)?;
        Some(self.nodes.remove(idx).1)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|(nid, _)| *nid == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|(nid, _)| *nid == id)
            .map(|(_, n)| n)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|(nid, _)| *nid == id)
            .map(|(_, n)| n)
    }

    pub fn mesh(&self, id: NodeId) -> Option<&Mesh> {
        match self.get(id)? {
            Node::Mesh(m) => Some(m),
            Node::Light(_) => None,
        }
    }

    pub fn mesh_mut(&mut self, id: NodeId) -> Option<&mut Mesh> {
        match self.get_mut(id)? {
            Node::Mesh(m) => Some(m),
            Node::Light(_) => None,
        }
    }

    pub fn light(&self, id: NodeId) -> Option<&Light> {
        match self.get(id)? {
            Node::Light(l) => Some(l),
            Node::Mesh(_) => None,
        }
    }

    pub fn light_mut(&mut self, id: NodeId) -> Option<&mut Light> {
        match self.get_mut(id)? {
            Node::Light(l) => Some(l),
            Node::Mesh(_) => None,
        }
    }

    /// Meshes in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &Mesh)> {
        self.nodes.iter().filter_map(|(id, n)| match n {
            Node::Mesh(m) => Some((*id, m)),
            Node::Light(_) => None,
        })
    }

    pub fn lights(&self) -> impl Iterator<Item = (NodeId, &Light)> {
        self.nodes.iter().filter_map(|(id, n)| match n {
            Node::Light(l) => Some((*id, l)),
            Node::Mesh(_) => None,
        })
    }
}
