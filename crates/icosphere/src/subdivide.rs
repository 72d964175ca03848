//! Breadth-first 1-to-4 refinement of the face forest.
//!
//! Every pass splits each current leaf exactly once, so all leaves stay at the
//! same depth. Edge midpoints are welded: the first face to split an edge
//! creates the midpoint vertex and re-routes the edge's endpoints through it;
//! the face across the edge later finds that vertex as a shared neighbor of the
//! endpoints and reuses it.
//!
//! All work happens on the unit sphere in `f64`, so precision and tolerance are
//! independent of the radius the mesh is finally emitted at.

use crate::face::{FaceForest, FaceId};
use crate::vertex_registry::{VertexId, VertexRegistry};

/// Fraction of the shortest current edge used as the midpoint match tolerance.
///
/// The nearest wrong candidate (the far vertex of a face on the edge) sits about
/// 0.87 edge lengths from the expected midpoint, the right one at zero.
pub const DEFAULT_WELD_TOLERANCE_FACTOR: f64 = 0.25;

/// What a single pass did; logged at debug level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassStats {
    /// Depth reached after this pass.
    pub depth: u32,
    pub leaves: usize,
    pub vertices: usize,
    /// Midpoints created by this pass.
    pub created: usize,
    /// Midpoint lookups answered by an existing vertex.
    pub welded: usize,
    pub tolerance: f64,
}

/// Shortest edge among the current leaves (`f64::INFINITY` for an empty forest).
pub fn min_leaf_edge_length(registry: &VertexRegistry, forest: &FaceForest) -> f64 {
    forest
        .leaves()
        .iter()
        .flat_map(|&id| forest.get(id).edges())
        .map(|(a, b)| registry.position(a).distance(registry.position(b)))
        .fold(f64::INFINITY, f64::min)
}

/// Splits leaves and welds shared midpoints onto the unit sphere.
#[derive(Debug, Clone, Copy)]
pub struct FaceSubdivider {
    weld_tolerance_factor: f64,
}

impl Default for FaceSubdivider {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceSubdivider {
    pub fn new() -> Self {
        Self {
            weld_tolerance_factor: DEFAULT_WELD_TOLERANCE_FACTOR,
        }
    }

    pub fn with_weld_tolerance_factor(mut self, factor: f64) -> Self {
        self.weld_tolerance_factor = factor;
        self
    }

    /// Match tolerance for the next pass, scaled to the current edge length.
    pub fn weld_tolerance(&self, registry: &VertexRegistry, forest: &FaceForest) -> f64 {
        self.weld_tolerance_factor * min_leaf_edge_length(registry, forest)
    }

    /// Run `depth` passes over the forest.
    pub fn subdivide_all(
        &self,
        registry: &mut VertexRegistry,
        forest: &mut FaceForest,
        depth: u32,
    ) -> Vec<PassStats> {
        (0..depth).map(|_| self.subdivide_pass(registry, forest)).collect()
    }

    /// Split every current leaf once.
    pub fn subdivide_pass(&self, registry: &mut VertexRegistry, forest: &mut FaceForest) -> PassStats {
        let tolerance = self.weld_tolerance(registry, forest);
        let before = registry.len();
        let mut welded = 0;

        let parents = forest.leaves().to_vec();
        let mut next = Vec::with_capacity(parents.len() * 4);
        for parent in parents {
            let (children, reused) = self.split_leaf(registry, forest, parent, tolerance);
            welded += reused;
            next.extend_from_slice(&children);
        }
        forest.advance(next);

        let stats = PassStats {
            depth: forest.depth(),
            leaves: forest.leaves().len(),
            vertices: registry.len(),
            created: registry.len() - before,
            welded,
            tolerance,
        };
        log::debug!(
            "Subdivision pass {}: {} leaves, {} vertices ({} new, {} welded), tolerance {:.3e}",
            stats.depth,
            stats.leaves,
            stats.vertices,
            stats.created,
            stats.welded,
            stats.tolerance
        );
        stats
    }

    /// Standard 1-to-4 split: three corner children and one center child, all
    /// in the parent's winding. Returns the children and how many midpoints
    /// were reused.
    fn split_leaf(
        &self,
        registry: &mut VertexRegistry,
        forest: &mut FaceForest,
        leaf: FaceId,
        tolerance: f64,
    ) -> ([FaceId; 4], usize) {
        let [a, b, c] = forest.get(leaf).vertices;
        let (ab, r0) = self.midpoint(registry, a, b, tolerance);
        let (bc, r1) = self.midpoint(registry, b, c, tolerance);
        let (ca, r2) = self.midpoint(registry, c, a, tolerance);

        let children = forest.split(
            leaf,
            [[a, ab, ca], [ab, b, bc], [ca, bc, c], [ab, bc, ca]],
        );
        for &child in &children {
            for (p, q) in forest.get(child).edges() {
                registry.connect(p, q);
            }
        }
        (children, [r0, r1, r2].iter().filter(|&&r| r).count())
    }

    /// Midpoint vertex of edge `a`-`b`, reusing the one created from the other
    /// side of the edge when it exists.
    fn midpoint(
        &self,
        registry: &mut VertexRegistry,
        a: VertexId,
        b: VertexId,
        tolerance: f64,
    ) -> (VertexId, bool) {
        let position = ((registry.position(a) + registry.position(b)) * 0.5).normalize();
        if let Some(existing) = registry.find_shared_neighbor(a, b, position, tolerance) {
            return (existing, true);
        }
        let m = registry.create_vertex(position);
        registry.replace_neighbor(a, b, m);
        registry.replace_neighbor(b, a, m);
        (m, false)
    }
}
