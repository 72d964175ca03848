//! Validation of an emitted triangle list: vertex welding, watertightness and
//! numeric accuracy of positions and normals.
//!
//! Error metrics are computed in `f64` so that `f32` records near the ends of
//! the float range (radius 1e20 or 1e-12) can be measured without overflow.

use crate::vertex::MeshVertex;
use glam::DVec3;
use std::collections::HashMap;
use std::fmt;

/// Quantisation steps per radius when matching positions.
const POSITION_STEPS: f64 = 100_000.0;

type PositionKey = (i64, i64, i64);

fn position_key(p: DVec3, radius: f64) -> PositionKey {
    let q = |x: f64| (x / radius * POSITION_STEPS).round() as i64;
    (q(p.x), q(p.y), q(p.z))
}

/// Summary of a triangle-list mesh on a sphere of known radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeshReport {
    pub triangle_count: usize,
    /// Unique positions after near-exact matching.
    pub distinct_positions: usize,
    /// Unique undirected edges.
    pub edge_count: usize,
    /// Edges used by a single triangle (cracks and seams).
    pub open_edges: usize,
    /// Edges used by more than two triangles.
    pub overshared_edges: usize,
    /// Largest `| |p| - radius |`.
    pub max_radius_error: f64,
    /// Largest `| |p| / radius - 1 |`.
    pub max_relative_radius_error: f64,
    /// Largest `| |n| - 1 |`.
    pub max_normal_error: f64,
    /// Records whose normal does not point away from the origin.
    pub inward_normals: usize,
}

impl MeshReport {
    pub fn analyze(vertices: &[MeshVertex], radius: f32) -> Self {
        let mut report = MeshReport {
            triangle_count: vertices.len() / 3,
            ..Default::default()
        };

        let radius = f64::from(radius);
        let mut ids: HashMap<PositionKey, u32> = HashMap::new();
        let mut edges: HashMap<(u32, u32), u32> = HashMap::new();
        for tri in vertices.chunks_exact(3) {
            let mut corner = [0u32; 3];
            for (slot, v) in corner.iter_mut().zip(tri) {
                let (p, n) = (v.position().as_dvec3(), v.normal().as_dvec3());
                let next = ids.len() as u32;
                *slot = *ids.entry(position_key(p, radius)).or_insert(next);

                let error = (p.length() - radius).abs();
                report.max_radius_error = report.max_radius_error.max(error);
                report.max_relative_radius_error = report.max_relative_radius_error.max(error / radius);
                report.max_normal_error = report.max_normal_error.max((n.length() - 1.0).abs());
                if n.dot(p) <= 0.0 {
                    report.inward_normals += 1;
                }
            }
            let [a, b, c] = corner;
            for (p, q) in [(a, b), (b, c), (c, a)] {
                *edges.entry((p.min(q), p.max(q))).or_default() += 1;
            }
        }

        report.distinct_positions = ids.len();
        report.edge_count = edges.len();
        for &uses in edges.values() {
            match uses {
                1 => report.open_edges += 1,
                2 => {}
                _ => report.overshared_edges += 1,
            }
        }
        report
    }

    /// Every edge is shared by exactly two triangles.
    pub fn is_watertight(&self) -> bool {
        self.triangle_count > 0 && self.open_edges == 0 && self.overshared_edges == 0
    }

    /// Euler characteristic `V - E + F`; 2 for a closed sphere.
    pub fn euler_characteristic(&self) -> i64 {
        self.distinct_positions as i64 - self.edge_count as i64 + self.triangle_count as i64
    }
}

impl fmt::Display for MeshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} triangles, {} vertices, {} edges ({} open, {} overshared), \
             radius err {:.2e} (rel {:.2e}), normal err {:.2e}, {} inward normals",
            self.triangle_count,
            self.distinct_positions,
            self.edge_count,
            self.open_edges,
            self.overshared_edges,
            self.max_radius_error,
            self.max_relative_radius_error,
            self.max_normal_error,
            self.inward_normals
        )
    }
}
