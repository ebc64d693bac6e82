//! Rendering data for the voxel engine.
//!
//! This module produces what the GPU consumes: the packed vertex format and the greedy
//! meshes built from chunk contents. Uploading and drawing are left to the host renderer.

pub mod meshing;
pub mod vertex;

// Re-export commonly used types
pub use meshing::{Mesh, MeshManager};
pub use vertex::{PackedMeta, Vertex};
