//! Mesh generation and management for voxel rendering.
//!
//! [`MeshManager`] owns the current mesh of a chunk and replaces it wholesale whenever
//! the chunk changes. There is no partial update: a remesh always runs the full greedy
//! pass and swaps the buffer in one step, so readers never observe a half-built mesh.

use log::debug;

use crate::engine_state::voxels::{block::registry::BlockRegistry, chunk::Chunk};
use crate::error::Result;

pub mod mesh;

pub use mesh::Mesh;

/// Holds the most recently generated mesh and counts regenerations.
#[derive(Debug, Default)]
pub struct MeshManager {
    current: Mesh,
    generation: u64,
}

impl MeshManager {
    /// A manager holding an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Regenerates the mesh from scratch and swaps it in.
    ///
    /// # Returns
    /// The new mesh.
    ///
    /// # Errors
    /// On failure the previous mesh is kept and the error is returned.
    pub fn generate_mesh_for_chunk(&mut self, chunk: &Chunk, registry: &BlockRegistry) -> Result<&Mesh> {
        let mesh = mesh::greedy(chunk, registry)?;
        self.current = mesh;
        self.generation += 1;
        debug!(
            "Mesh generation {} ready: {} floats",
            self.generation,
            self.current.float_len()
        );
        Ok(&self.current)
    }

    /// The most recently generated mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.current
    }

    /// How many times the mesh has been replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
