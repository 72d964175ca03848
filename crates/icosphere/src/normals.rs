//! Smooth per-vertex normals from leaf-face geometry.

use crate::face::FaceForest;
use crate::vertex_registry::{NormalFinalization, VertexRegistry};

/// Add each leaf's area-weighted face normal into its three vertices, then
/// normalize every accumulator.
///
/// Internal faces are skipped. The result lists vertices that touched no leaf
/// separately from vertices whose summed normal could not be normalized; a
/// well-formed icosphere has neither.
pub fn accumulate_normals(registry: &mut VertexRegistry, forest: &FaceForest) -> NormalFinalization {
    let mut visited = 0usize;
    for face in forest.leaves_depth_first() {
        let [a, b, c] = face.vertices;
        let (pa, pb, pc) = (registry.position(a), registry.position(b), registry.position(c));
        let normal = (pb - pa).cross(pc - pa);
        for v in face.vertices {
            registry.accumulate_normal(v, normal);
        }
        visited += 1;
    }

    let result = registry.finalize_normals();
    if result.is_clean() {
        log::debug!("Accumulated normals from {} leaf faces", visited);
    }
    if !result.orphans.is_empty() {
        log::warn!(
            "{} of {} vertices belong to no leaf face and have no normal",
            result.orphans.len(),
            registry.len()
        );
    }
    if !result.degenerate.is_empty() {
        log::warn!(
            "{} of {} vertices have a normal sum that cannot be normalized",
            result.degenerate.len(),
            registry.len()
        );
    }
    result
}
