//! Icosphere generation pipeline: build, subdivide, accumulate normals, emit.
//!
//! The graph is built on the unit sphere in `f64`; the configured radius only
//! scales positions at emission, so any normal `f32` radius yields the same
//! topology and unit normals.
//!
//! **Determinism:** generation uses no randomness or global state, so equal
//! inputs always produce the same buffer in the same order.

use crate::emit::emit_into;
use crate::error::{check_radius, IcosphereError, Result};
use crate::face::FaceForest;
use crate::icosahedron::build_icosahedron;
use crate::normals::accumulate_normals;
use crate::subdivide::{FaceSubdivider, DEFAULT_WELD_TOLERANCE_FACTOR};
use crate::vertex::{as_floats, MeshVertex};
use crate::vertex_registry::{NormalFinalization, VertexRegistry};
use serde::{Deserialize, Serialize};

/// Deepest supported subdivision (1.3M triangles).
pub const MAX_DEPTH: u32 = 8;

/// Leaf triangles after `depth` passes: `20 * 4^depth` (valid for depth < 30).
pub const fn leaf_count(depth: u32) -> u64 {
    20 * (1u64 << (2 * depth))
}

/// Unique vertices after `depth` passes: `10 * 4^depth + 2`.
pub const fn distinct_vertex_count(depth: u32) -> u64 {
    10 * (1u64 << (2 * depth)) + 2
}

/// Faces in the forest after `depth` passes, internal ones included.
const fn total_face_count(depth: u32) -> u64 {
    // 20 * (4^(depth+1) - 1) / 3
    20 * ((1u64 << (2 * (depth + 1))) - 1) / 3
}

/// Icosphere settings. Loadable from RON/JSON through serde.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IcosphereConfig {
    /// Sphere radius; every vertex lies at this distance from the origin.
    /// Any positive normal `f32` is accepted.
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Number of 1-to-4 subdivision passes over the base icosahedron.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Midpoint weld tolerance as a fraction of the shortest current edge.
    #[serde(default = "default_weld_tolerance_factor")]
    pub weld_tolerance_factor: f64,
}

fn default_radius() -> f32 {
    1.0
}
fn default_depth() -> u32 {
    3
}
fn default_weld_tolerance_factor() -> f64 {
    DEFAULT_WELD_TOLERANCE_FACTOR
}

impl Default for IcosphereConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            depth: default_depth(),
            weld_tolerance_factor: default_weld_tolerance_factor(),
        }
    }
}

impl IcosphereConfig {
    pub fn new(radius: f32, depth: u32) -> Self {
        Self {
            radius,
            depth,
            ..Default::default()
        }
    }

    /// Reject configurations that cannot produce a valid mesh.
    pub fn validate(&self) -> Result<()> {
        check_radius(self.radius)?;
        if self.depth > MAX_DEPTH {
            return Err(IcosphereError::DepthTooLarge {
                depth: self.depth,
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }
}

/// A finished sphere mesh: `triangle_count * 3` position+normal records.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    pub vertices: Vec<MeshVertex>,
    pub triangle_count: u32,
}

impl SphereMesh {
    /// Flat float buffer, six floats per record.
    pub fn as_floats(&self) -> &[f32] {
        as_floats(&self.vertices)
    }

    pub fn triangles(&self) -> std::slice::ChunksExact<'_, MeshVertex> {
        self.vertices.chunks_exact(3)
    }
}

fn require_unit_normals(normals: &NormalFinalization) -> Result<()> {
    if normals.is_clean() {
        Ok(())
    } else {
        Err(IcosphereError::MissingNormals {
            orphans: normals.orphans.len(),
            degenerate: normals.degenerate.len(),
        })
    }
}

/// The intermediate graph kept alive for inspection (tests, debugging).
#[derive(Debug, Clone)]
pub struct Icosphere {
    pub config: IcosphereConfig,
    pub registry: VertexRegistry,
    pub forest: FaceForest,
}

impl Icosphere {
    /// Build and subdivide the graph and finalize normals, without emitting.
    ///
    /// Fails with [`IcosphereError::MissingNormals`] if any vertex is left
    /// without a unit normal, which only a broken weld tolerance can cause.
    pub fn build(config: &IcosphereConfig) -> Result<Self> {
        config.validate()?;

        let mut registry = VertexRegistry::with_capacity(distinct_vertex_count(config.depth) as usize);
        let mut forest = FaceForest::with_capacity(total_face_count(config.depth) as usize);
        build_icosahedron(&mut registry, &mut forest);
        FaceSubdivider::new()
            .with_weld_tolerance_factor(config.weld_tolerance_factor)
            .subdivide_all(&mut registry, &mut forest, config.depth);

        require_unit_normals(&accumulate_normals(&mut registry, &forest))?;

        Ok(Self {
            config: *config,
            registry,
            forest,
        })
    }

    /// Flatten the leaves into a vertex buffer.
    pub fn emit(&self) -> SphereMesh {
        let triangle_count = leaf_count(self.config.depth) as usize;
        let mut vertices = Vec::with_capacity(triangle_count * 3);
        emit_into(&self.registry, &self.forest, self.config.radius, &mut vertices);
        debug_assert_eq!(vertices.len(), triangle_count * 3);
        SphereMesh {
            triangle_count: (vertices.len() / 3) as u32,
            vertices,
        }
    }
}

/// Generate a complete icosphere mesh from a config.
pub fn generate(config: &IcosphereConfig) -> Result<SphereMesh> {
    let mesh = Icosphere::build(config)?.emit();
    log::debug!(
        "Generated icosphere r={} depth={}: {} triangles",
        config.radius,
        config.depth,
        mesh.triangle_count
    );
    Ok(mesh)
}

/// Generate an icosphere of `radius` refined `depth` times with default welding.
pub fn generate_icosphere(radius: f32, depth: u32) -> Result<SphereMesh> {
    generate(&IcosphereConfig::new(radius, depth))
}
