//! Procedural sphere meshes for the renderer.
//!
//! The main generator builds a geodesic icosphere: a regular icosahedron is
//! refined 1-to-4 `depth` times, shared edge midpoints are welded so the result
//! is a closed, seamless triangle mesh, and smooth normals are accumulated from
//! the final faces. The output is a flat triangle list of position+normal
//! records ready for upload.
//!
//! - Vertex arena and adjacency graph
//! - Face forest and breadth-first subdivision
//! - Normal accumulation and emission
//! - A latitude/longitude sphere and a mesh validation report

pub mod analysis;
pub mod emit;
pub mod error;
pub mod face;
pub mod icosahedron;
pub mod normals;
pub mod sphere;
pub mod subdivide;
pub mod uv_sphere;
pub mod vertex;
pub mod vertex_registry;

pub use analysis::*;
pub use emit::*;
pub use error::*;
pub use face::*;
pub use icosahedron::*;
pub use normals::*;
pub use sphere::*;
pub use subdivide::*;
pub use uv_sphere::*;
pub use vertex::*;
pub use vertex_registry::*;
