//! Flattening of the leaf faces into a renderable triangle list.

use crate::face::FaceForest;
use crate::vertex::MeshVertex;
use crate::vertex_registry::VertexRegistry;

/// Append three records per leaf face, in stored winding order, walking the
/// root trees depth first. Internal faces emit nothing.
///
/// The registry holds unit-sphere positions; they are scaled by `radius` here
/// and rounded to `f32` once per component.
///
/// `out` should be pre-sized with `leaf_count(depth) * 3`; the walk never
/// needs to grow it in that case.
pub fn emit_into(
    registry: &VertexRegistry,
    forest: &FaceForest,
    radius: f32,
    out: &mut Vec<MeshVertex>,
) {
    debug_assert!(registry.normals_finalized(), "emitting before normals were finalized");
    let scale = f64::from(radius);
    for face in forest.leaves_depth_first() {
        out.extend(face.vertices.iter().map(|&v| {
            MeshVertex::new(
                (registry.position(v) * scale).as_vec3(),
                registry.normal(v).as_vec3(),
            )
        }));
    }
}

/// Emit into a freshly allocated buffer sized for the current leaves.
pub fn emit(registry: &VertexRegistry, forest: &FaceForest, radius: f32) -> Vec<MeshVertex> {
    let mut out = Vec::with_capacity(forest.leaves().len() * 3);
    emit_into(registry, forest, radius, &mut out);
    out
}
