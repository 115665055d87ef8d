//! Scene geometry: vertex layouts, the ship and light-cube meshes, and the
//! flat face-normal pass run once at load time.
//!
//! # Invariants
//! - Normals are written once by the normal pass and never touched again.
//! - Meshes are immutable after construction.

pub mod normals;
pub mod shapes;
pub mod vertex;

pub use normals::{MeshError, compute_face_normals, compute_face_normals_strided};
pub use shapes::{light_cube_mesh, ship_mesh};
pub use vertex::{LightVertex, Mesh, Vertex, VertexLayout};

pub fn crate_info() -> &'static str {
    "astro-mesh v0.1.0"
}
