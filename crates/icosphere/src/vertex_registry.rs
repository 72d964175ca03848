//! Arena of sphere vertices and their mutual adjacency.
//!
//! Vertices are addressed by dense integer ids; neighbor links are stored as
//! fixed-size id slots rather than references, so the cyclic adjacency graph
//! needs no shared ownership. Neighbor relations are kept symmetric: if A lists
//! B, B lists A.

use glam::DVec3;

/// Dense vertex index into a [`VertexRegistry`].
pub type VertexId = u32;

/// Maximum valence of a geodesic sphere vertex (base vertices have 5).
pub const MAX_NEIGHBORS: usize = 6;

/// A single vertex: position, normal accumulator and neighbor slots.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexRecord {
    pub id: VertexId,
    pub position: DVec3,
    /// Sum of adjacent leaf-face normals until finalized, unit length after.
    pub normal: DVec3,
    neighbors: [VertexId; MAX_NEIGHBORS],
    neighbor_count: u8,
}

impl VertexRecord {
    fn new(id: VertexId, position: DVec3) -> Self {
        Self {
            id,
            position,
            normal: DVec3::ZERO,
            neighbors: [0; MAX_NEIGHBORS],
            neighbor_count: 0,
        }
    }

    /// Currently linked neighbor ids.
    pub fn neighbors(&self) -> &[VertexId] {
        &self.neighbors[..self.neighbor_count as usize]
    }

    pub fn has_neighbor(&self, other: VertexId) -> bool {
        self.neighbors().contains(&other)
    }

    pub fn is_full(&self) -> bool {
        self.neighbor_count as usize == MAX_NEIGHBORS
    }

    fn push_neighbor(&mut self, other: VertexId) {
        self.neighbors[self.neighbor_count as usize] = other;
        self.neighbor_count += 1;
    }
}

/// Vertices left without a unit normal by [`VertexRegistry::finalize_normals`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalFinalization {
    /// No leaf face contributed to these.
    pub orphans: Vec<VertexId>,
    /// Contributions summed to something non-zero that does not normalize
    /// (non-finite or too small to scale).
    pub degenerate: Vec<VertexId>,
}

impl NormalFinalization {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty() && self.degenerate.is_empty()
    }
}

/// Owns every vertex record. Ids are handed out in creation order.
#[derive(Debug, Clone, Default)]
pub struct VertexRegistry {
    vertices: Vec<VertexRecord>,
    normals_finalized: bool,
}

impl VertexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with room for `capacity` vertices (see `distinct_vertex_count`).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            normals_finalized: false,
        }
    }

    /// Append a vertex with zero normal and no neighbors; returns its id.
    pub fn create_vertex(&mut self, position: DVec3) -> VertexId {
        let id = self.vertices.len() as VertexId;
        self.vertices.push(VertexRecord::new(id, position));
        id
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn get(&self, id: VertexId) -> &VertexRecord {
        &self.vertices[id as usize]
    }

    pub fn position(&self, id: VertexId) -> DVec3 {
        self.vertices[id as usize].position
    }

    pub fn normal(&self, id: VertexId) -> DVec3 {
        self.vertices[id as usize].normal
    }

    pub fn iter(&self) -> impl Iterator<Item = &VertexRecord> {
        self.vertices.iter()
    }

    /// Link `a` and `b` as mutual neighbors.
    ///
    /// No-op when they are already linked or either side has no free slot.
    /// Returns whether a new link was made.
    pub fn connect(&mut self, a: VertexId, b: VertexId) -> bool {
        if a == b {
            return false;
        }
        let (va, vb) = (&self.vertices[a as usize], &self.vertices[b as usize]);
        if va.has_neighbor(b) || vb.has_neighbor(a) {
            return false;
        }
        if va.is_full() || vb.is_full() {
            log::warn!("Vertex adjacency full, skipping link {} <-> {}", a, b);
            return false;
        }
        self.vertices[a as usize].push_neighbor(b);
        self.vertices[b as usize].push_neighbor(a);
        true
    }

    /// A common neighbor of `a` and `b` lying within `epsilon` of `expected_midpoint`.
    ///
    /// Adjacency alone is ambiguous (two base vertices share two common
    /// neighbors), so the position filter is what identifies the edge midpoint.
    pub fn find_shared_neighbor(
        &self,
        a: VertexId,
        b: VertexId,
        expected_midpoint: DVec3,
        epsilon: f64,
    ) -> Option<VertexId> {
        let vb = &self.vertices[b as usize];
        self.vertices[a as usize]
            .neighbors()
            .iter()
            .copied()
            .filter(|&n| vb.has_neighbor(n))
            .find(|&n| self.position(n).distance(expected_midpoint) <= epsilon)
    }

    /// Swap `vertex`'s link to `old_neighbor` for a link to `new_neighbor`.
    ///
    /// Called on both endpoints of a split edge, this severs the direct edge and
    /// routes each endpoint through the midpoint. The slot is reused in place, so
    /// `vertex`'s valence is unchanged.
    pub fn replace_neighbor(
        &mut self,
        vertex: VertexId,
        old_neighbor: VertexId,
        new_neighbor: VertexId,
    ) {
        let record = &mut self.vertices[vertex as usize];
        let count = record.neighbor_count as usize;
        let Some(slot) = record.neighbors[..count].iter().position(|&n| n == old_neighbor) else {
            self.connect(vertex, new_neighbor);
            return;
        };
        if record.neighbors[..count].contains(&new_neighbor) {
            // Already linked to the midpoint; just drop the stale edge.
            record.neighbors.copy_within(slot + 1..count, slot);
            record.neighbor_count -= 1;
        } else {
            record.neighbors[slot] = new_neighbor;
            let new_record = &mut self.vertices[new_neighbor as usize];
            if !new_record.has_neighbor(vertex) {
                if new_record.is_full() {
                    log::warn!(
                        "Vertex adjacency full, {} cannot take back-link to {}",
                        new_neighbor,
                        vertex
                    );
                } else {
                    new_record.push_neighbor(vertex);
                }
            }
        }
    }

    /// Add a face normal into a vertex accumulator.
    pub(crate) fn accumulate_normal(&mut self, id: VertexId, contribution: DVec3) {
        debug_assert!(!self.normals_finalized, "normal accumulated after finalization");
        self.vertices[id as usize].normal += contribution;
    }

    /// Normalize every accumulator and report the ones that could not be.
    pub(crate) fn finalize_normals(&mut self) -> NormalFinalization {
        let mut result = NormalFinalization::default();
        for v in &mut self.vertices {
            if v.normal == DVec3::ZERO {
                result.orphans.push(v.id);
            } else if let Some(n) = v.normal.try_normalize() {
                v.normal = n;
            } else {
                result.degenerate.push(v.id);
            }
        }
        self.normals_finalized = true;
        result
    }

    pub fn normals_finalized(&self) -> bool {
        self.normals_finalized
    }

    /// True when every neighbor link has a matching back-link.
    pub fn is_symmetric(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.neighbors().iter().all(|&n| self.get(n).has_neighbor(v.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (VertexRegistry, [VertexId; 3]) {
        let mut reg = VertexRegistry::new();
        let a = reg.create_vertex(DVec3::X);
        let b = reg.create_vertex(DVec3::Y);
        let c = reg.create_vertex(DVec3::Z);
        reg.connect(a, b);
        reg.connect(b, c);
        reg.connect(c, a);
        (reg, [a, b, c])
    }

    #[test]
    fn create_vertex_ids_are_sequential() {
        let mut reg = VertexRegistry::new();
        assert_eq!(reg.create_vertex(DVec3::X), 0);
        assert_eq!(reg.create_vertex(DVec3::Y), 1);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.normal(1), DVec3::ZERO);
        assert!(reg.get(0).neighbors().is_empty());
    }

    #[test]
    fn connect_is_symmetric_and_idempotent() {
        let (mut reg, [a, b, _]) = triangle();
        assert!(!reg.connect(a, b));
        assert!(!reg.connect(b, a));
        assert_eq!(reg.get(a).neighbors().len(), 2);
        assert!(reg.get(b).has_neighbor(a));
        assert!(reg.is_symmetric());
    }

    #[test]
    fn connect_is_noop_when_slots_are_full() {
        let mut reg = VertexRegistry::new();
        let hub = reg.create_vertex(DVec3::ZERO);
        for i in 0..MAX_NEIGHBORS {
            let v = reg.create_vertex(DVec3::splat(i as f64 + 1.0));
            assert!(reg.connect(hub, v));
        }
        let extra = reg.create_vertex(DVec3::NEG_ONE);
        assert!(!reg.connect(hub, extra));
        assert!(reg.get(extra).neighbors().is_empty());
        assert!(reg.is_symmetric());
    }

    #[test]
    fn find_shared_neighbor_filters_by_position() {
        // Square a-b-c-d with both c and d adjacent to a and b.
        let mut reg = VertexRegistry::new();
        let a = reg.create_vertex(DVec3::new(0.0, 0.0, 0.0));
        let b = reg.create_vertex(DVec3::new(2.0, 0.0, 0.0));
        let c = reg.create_vertex(DVec3::new(1.0, 1.0, 0.0));
        let d = reg.create_vertex(DVec3::new(1.0, -1.0, 0.0));
        for n in [c, d] {
            reg.connect(a, n);
            reg.connect(b, n);
        }
        assert_eq!(reg.find_shared_neighbor(a, b, DVec3::new(1.0, -0.9, 0.0), 0.2), Some(d));
        assert_eq!(reg.find_shared_neighbor(a, b, DVec3::new(1.0, 0.0, 0.0), 0.2), None);
        // Too loose a tolerance picks whichever adjacency match comes first.
        assert_eq!(reg.find_shared_neighbor(a, b, DVec3::new(1.0, 0.0, 0.0), 5.0), Some(c));
    }

    #[test]
    fn replace_neighbor_routes_edge_through_midpoint() {
        let (mut reg, [a, b, _]) = triangle();
        let m = reg.create_vertex((DVec3::X + DVec3::Y).normalize());
        reg.replace_neighbor(a, b, m);
        reg.replace_neighbor(b, a, m);

        assert!(!reg.get(a).has_neighbor(b));
        assert!(!reg.get(b).has_neighbor(a));
        assert!(reg.get(a).has_neighbor(m));
        assert!(reg.get(b).has_neighbor(m));
        assert_eq!(reg.get(m).neighbors(), &[a, b]);
        assert_eq!(reg.get(a).neighbors().len(), 2);
        assert!(reg.is_symmetric());
        assert_eq!(reg.find_shared_neighbor(a, b, reg.position(m), 1e-4), Some(m));
    }

    #[test]
    fn replace_neighbor_without_old_link_just_connects() {
        let mut reg = VertexRegistry::new();
        let a = reg.create_vertex(DVec3::X);
        let m = reg.create_vertex(DVec3::Y);
        reg.replace_neighbor(a, 99, m);
        assert!(reg.get(a).has_neighbor(m));
        assert!(reg.is_symmetric());
    }

    #[test]
    fn finalize_normals_reports_orphans() {
        let (mut reg, [a, b, c]) = triangle();
        reg.accumulate_normal(a, DVec3::new(0.0, 3.0, 0.0));
        reg.accumulate_normal(b, DVec3::new(1.0, 1.0, 0.0));
        let result = reg.finalize_normals();
        assert_eq!(result.orphans, vec![c]);
        assert!(result.degenerate.is_empty());
        assert!(!result.is_clean());
        assert!(reg.normals_finalized());
        assert!(reg.normal(a).distance(DVec3::Y) < 1e-12);
        assert!((reg.normal(b).length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn finalize_normals_separates_unnormalizable_sums() {
        let (mut reg, [a, b, c]) = triangle();
        reg.accumulate_normal(a, DVec3::new(f64::INFINITY, 0.0, 0.0));
        reg.accumulate_normal(b, DVec3::new(f64::NAN, 1.0, 0.0));
        reg.accumulate_normal(c, DVec3::new(0.0, 0.0, 2.0));
        let result = reg.finalize_normals();
        assert!(result.orphans.is_empty());
        assert_eq!(result.degenerate, vec![a, b]);
        assert!(reg.normal(c).distance(DVec3::Z) < 1e-12);
    }
}
