//! Regular icosahedron: the 12-vertex, 20-face base solid of the icosphere.
//!
//! Layout (y-up): vertex 0 is the north pole, 1..=5 the upper ring, 6..=10 the
//! lower ring rotated 36°, 11 the south pole. Both rings sit at latitude
//! ±atan(1/2), the elevation at which every edge has the same length.
//!
//! The solid is always built on the unit sphere; the radius is applied when the
//! mesh is emitted.

use crate::face::FaceForest;
use crate::vertex_registry::{VertexId, VertexRegistry};
use glam::DVec3;
use std::f64::consts::PI;

pub const BASE_VERTEX_COUNT: usize = 12;
pub const BASE_FACE_COUNT: usize = 20;
pub const BASE_EDGE_COUNT: usize = 30;

const NORTH: VertexId = 0;
const SOUTH: VertexId = 11;

fn upper(i: u32) -> VertexId {
    1 + i % 5
}

fn lower(i: u32) -> VertexId {
    6 + i % 5
}

/// Ring latitude. For a regular icosahedron tan(lat) = 1/2, equivalently the
/// ring-to-pole edge and the ring edge both equal `4 / sqrt(10 + 2 sqrt 5)`,
/// the golden-ratio edge length of a unit-circumradius icosahedron.
fn ring_latitude() -> f64 {
    0.5_f64.atan()
}

/// Edge length of the unit icosahedron.
pub fn base_edge_length() -> f64 {
    4.0 / (10.0 + 2.0 * 5.0_f64.sqrt()).sqrt()
}

/// The 12 vertex positions on the unit sphere, in id order.
pub fn base_vertices() -> [DVec3; BASE_VERTEX_COUNT] {
    let lat = ring_latitude();
    let (y, ring) = (lat.sin(), lat.cos());
    let step = 2.0 * PI / 5.0;

    let mut out = [DVec3::ZERO; BASE_VERTEX_COUNT];
    out[NORTH as usize] = DVec3::Y;
    for i in 0..5 {
        let a = i as f64 * step;
        out[upper(i) as usize] = DVec3::new(ring * a.cos(), y, ring * a.sin());
        let b = a + step * 0.5;
        out[lower(i) as usize] = DVec3::new(ring * b.cos(), -y, ring * b.sin());
    }
    out[SOUTH as usize] = DVec3::NEG_Y;
    out
}

/// The 20 faces, each wound counter-clockwise when seen from outside.
pub fn base_faces() -> [[VertexId; 3]; BASE_FACE_COUNT] {
    let mut faces = [[0; 3]; BASE_FACE_COUNT];
    for i in 0..5u32 {
        let k = i as usize;
        // North cap
        faces[k] = [NORTH, upper(i + 1), upper(i)];
        // Equatorial band: one up-pointing and one down-pointing triangle per step
        faces[5 + 2 * k] = [upper(i), upper(i + 1), lower(i)];
        faces[6 + 2 * k] = [lower(i), upper(i + 1), lower(i + 1)];
        // South cap
        faces[15 + k] = [lower(i), lower(i + 1), SOUTH];
    }
    faces
}

/// Populate an empty registry and forest with the base solid.
///
/// Every edge is registered through `connect`, leaving each vertex with five
/// neighbors.
pub fn build_icosahedron(registry: &mut VertexRegistry, forest: &mut FaceForest) {
    debug_assert!(registry.is_empty() && forest.is_empty());

    for position in base_vertices() {
        registry.create_vertex(position);
    }
    for vertices in base_faces() {
        let root = forest.add_root(vertices);
        for (a, b) in forest.get(root).edges() {
            registry.connect(a, b);
        }
    }
    log::debug!(
        "Built icosahedron: {} vertices, {} faces",
        registry.len(),
        forest.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn built() -> (VertexRegistry, FaceForest) {
        let mut registry = VertexRegistry::new();
        let mut forest = FaceForest::new();
        build_icosahedron(&mut registry, &mut forest);
        (registry, forest)
    }

    #[test]
    fn vertices_lie_on_unit_sphere() {
        for p in base_vertices() {
            assert!((p.length() - 1.0).abs() < 1e-12, "{p} not on the unit sphere");
        }
    }

    #[test]
    fn all_edges_have_equal_length() {
        let (registry, forest) = built();
        let mut edges = HashSet::new();
        for &root in forest.roots() {
            for (a, b) in forest.get(root).edges() {
                edges.insert((a.min(b), a.max(b)));
            }
        }
        assert_eq!(edges.len(), BASE_EDGE_COUNT);

        let expected = base_edge_length();
        for (a, b) in edges {
            let len = registry.position(a).distance(registry.position(b));
            assert!((len - expected).abs() < 1e-12, "edge {a}-{b} has length {len}");
        }
    }

    #[test]
    fn every_vertex_has_five_neighbors() {
        let (registry, _) = built();
        assert_eq!(registry.len(), BASE_VERTEX_COUNT);
        for v in registry.iter() {
            assert_eq!(v.neighbors().len(), 5, "vertex {}", v.id);
        }
        assert!(registry.is_symmetric());
    }

    #[test]
    fn faces_wind_outward() {
        let (registry, forest) = built();
        assert_eq!(forest.roots().len(), BASE_FACE_COUNT);
        for &root in forest.roots() {
            let [a, b, c] = forest.get(root).vertices.map(|v| registry.position(v));
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(a + b + c) > 0.0, "face {root} winds inward");
        }
    }

    #[test]
    fn each_base_edge_borders_two_faces_in_opposite_directions() {
        let mut directed = HashSet::new();
        for face in base_faces() {
            let [a, b, c] = face;
            for edge in [(a, b), (b, c), (c, a)] {
                assert!(directed.insert(edge), "directed edge {edge:?} used twice");
            }
        }
        for &(a, b) in &directed {
            assert!(directed.contains(&(b, a)), "edge {a}-{b} has no twin");
        }
    }

    #[test]
    fn adjacency_alone_is_ambiguous_on_the_base_solid() {
        // Both ends of an edge share the two opposite vertices of its faces.
        let (registry, _) = built();
        let shared: Vec<_> = registry
            .get(NORTH)
            .neighbors()
            .iter()
            .filter(|&&n| registry.get(upper(0)).has_neighbor(n))
            .collect();
        assert_eq!(shared.len(), 2);

        let mid = ((registry.position(NORTH) + registry.position(upper(0))) * 0.5).normalize();
        assert_eq!(registry.find_shared_neighbor(NORTH, upper(0), mid, 0.05), None);
    }
}
