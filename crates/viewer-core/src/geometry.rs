//! Immutable triangle geometry shared between meshes across rebuilds.

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Dodecahedron,
    Box,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Flat-shaded, non-indexed triangle list with counter-clockwise winding.
#[derive(Clone, Debug)]
pub struct Geometry {
    pub shape: Shape,
    pub vertices: Vec<Vertex>,
}

impl Geometry {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Regular dodecahedron with all corners on a sphere of `radius`.
    pub fn dodecahedron(radius: f32) -> Self {
        // Built as the dual of an icosahedron: each icosahedron corner becomes
        // a pentagon through the centroids of its five surrounding faces.
        let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let ico = [
            Vec3::new(-1.0, phi, 0.0),
            Vec3::new(1.0, phi, 0.0),
            Vec3::new(-1.0, -phi, 0.0),
            Vec3::new(1.0, -phi, 0.0),
            Vec3::new(0.0, -1.0, phi),
            Vec3::new(0.0, 1.0, phi),
            Vec3::new(0.0, -1.0, -phi),
            Vec3::new(0.0, 1.0, -phi),
            Vec3::new(phi, 0.0, -1.0),
            Vec3::new(phi, 0.0, 1.0),
            Vec3::new(-phi, 0.0, -1.0),
            Vec3::new(-phi, 0.0, 1.0),
        ];
        // Icosahedron edges have length 2; faces are mutually adjacent triples.
        let is_edge = |a: usize, b: usize| ((ico[a] - ico[b]).length() - 2.0).abs() < 1e-3;
        let mut faces: Vec<[usize; 3]> = Vec::with_capacity(20);
        for a in 0..ico.len() {
            for b in (a + 1)..ico.len() {
                for c in (b + 1)..ico.len() {
                    if is_edge(a, b) && is_edge(b, c) && is_edge(a, c) {
                        faces.push([a, b, c]);
                    }
                }
            }
        }
        let centroids: Vec<Vec3> = faces
            .iter()
            .map(|f| ((ico[f[0]] + ico[f[1]] + ico[f[2]]) / 3.0).normalize() * radius)
            .collect();

        let mut vertices = Vec::with_capacity(12 * 3 * 3);
        for (corner_index, corner) in ico.iter().enumerate() {
            let axis = corner.normalize();
            let mut ring: Vec<Vec3> = faces
                .iter()
                .zip(centroids.iter())
                .filter(|(f, _)| f.contains(&corner_index))
                .map(|(_, c)| *c)
                .collect();
            // Sort the pentagon's corners counter-clockwise around its axis.
            let u = (ring[0] - axis * ring[0].dot(axis)).normalize();
            let v = axis.cross(u);
            ring.sort_by(|p, q| {
                let ap = p.dot(v).atan2(p.dot(u));
                let aq = q.dot(v).atan2(q.dot(u));
                ap.total_cmp(&aq)
            });
            let normal = axis.to_array();
            for i in 1..ring.len() - 1 {
                for p in [ring[0], ring[i], ring[i + 1]] {
                    vertices.push(Vertex {
                        position: p.to_array(),
                        normal,
                    });
                }
            }
        }
        Self {
            shape: Shape::Dodecahedron,
            vertices,
        }
    }

    /// Axis-aligned box centred on the origin.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let h = Vec3::new(width, height, depth) * 0.5;
        // (normal, u, v) per face; corners are n +- u +- v scaled by h
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        let mut vertices = Vec::with_capacity(36);
        for (n, u, v) in faces {
            let corner = |su: f32, sv: f32| (n + u * su + v * sv) * h;
            let quad = [
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            ];
            for idx in [0, 1, 2, 0, 2, 3] {
                vertices.push(Vertex {
                    position: quad[idx].to_array(),
                    normal: n.to_array(),
                });
            }
        }
        Self {
            shape: Shape::Box,
            vertices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward_ccw(g: &Geometry) {
        for tri in g.vertices.chunks_exact(3) {
            let a = Vec3::from(tri[0].position);
            let b = Vec3::from(tri[1].position);
            let c = Vec3::from(tri[2].position);
            let n = (b - a).cross(c - a);
            assert!(n.dot(Vec3::from(tri[0].normal)) > 0.0, "triangle wound inward");
        }
    }

    #[test]
    fn dodecahedron_has_twelve_pentagons() {
        let g = Geometry::dodecahedron(1.0);
        // 12 faces fanned into 3 triangles each
        assert_eq!(g.triangle_count(), 36);
        for v in &g.vertices {
            let r = Vec3::from(v.position).length();
            assert!((r - 1.0).abs() < 1e-4, "corner off the unit sphere: {r}");
        }
        assert_outward_ccw(&g);
    }

    #[test]
    fn cuboid_extents_match_size() {
        let g = Geometry::cuboid(2.0, 0.1, 2.0);
        assert_eq!(g.triangle_count(), 12);
        let max_y = g
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!((max_y - 0.05).abs() < 1e-6);
        assert_outward_ccw(&g);
    }
}
