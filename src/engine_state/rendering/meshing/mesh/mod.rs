//! Mesh generation for voxel rendering.
//!
//! This module converts a chunk's cells into a GPU-friendly vertex buffer. It implements
//! greedy meshing to reduce the number of vertices by combining coplanar faces with the
//! same texture.
//!
//! # Architecture
//! - [`Mesh`]: The finished vertex buffer plus per-side quad bookkeeping
//! - [`Quad`]: One merged rectangle of faces
//! - [`FacePlane`]: The per-slab candidate grid the greedy pass consumes
//!
//! # Usage
//! ```no_run
//! use voxel_chunk::engine_state::{
//!     rendering::meshing::mesh::greedy,
//!     voxels::{block::registry::BlockRegistry, chunk::Chunk},
//! };
//!
//! let registry = BlockRegistry::new();
//! let mesh = greedy(&Chunk::new(), &registry).unwrap();
//! assert!(mesh.is_empty());
//! ```

mod face;
mod greedy;
mod mesh;

pub use face::{resolve_cells, to_chunk_position, FacePlane, Quad, ResolvedCell};
pub use greedy::greedy;
pub use mesh::*;
