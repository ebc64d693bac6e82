//! Greedy meshing implementation for voxel rendering.
//!
//! This module implements the greedy meshing algorithm which combines adjacent coplanar
//! faces with the same texture into larger quads, significantly reducing the number of
//! vertices needed to render a chunk.
//!
//! Each of the six sides is processed independently. For every slab perpendicular to the
//! side's axis a 16x16 plane of candidate faces is built and then consumed rectangle by
//! rectangle. Faces never merge across slabs, sides or textures.

use log::{debug, info};
use web_time::Instant;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, registry::BlockRegistry},
    chunk::{Chunk, CHUNK_DIMENSION},
};
use crate::error::Result;

use super::{
    face::{resolve_cells, FacePlane},
    mesh::Mesh,
};

/// Generates the complete mesh of a chunk.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
/// * `registry` - Registry the chunk's type indices refer to
///
/// # Returns
/// A new `Mesh` with the merged quads of all six sides, in side order
/// (right, left, top, bottom, front, back) and slab order within a side.
///
/// # Errors
/// `CorruptCell` if any occupied cell cannot be decoded. No partial mesh is returned.
///
/// # Performance
/// Visits each of the 4096 cells once per side. The output is deterministic: the same
/// chunk contents always produce the same buffer.
pub fn greedy(chunk: &Chunk, registry: &BlockRegistry) -> Result<Mesh> {
    let start = Instant::now();
    let resolved = resolve_cells(chunk, registry)?;

    let mut mesh = Mesh::new();
    let mut plane = FacePlane::new();
    for side in BlockSide::all() {
        for slab in 0..CHUNK_DIMENSION {
            plane.fill(&resolved, side, slab);
            plane.extract(side, slab, |quad| mesh.add_quad(quad));
        }
        debug!("{:?}: {} quads", side, mesh.quads_on(side));
    }

    info!(
        "Meshed {} blocks into {} quads ({} vertices) in {:?}",
        chunk.occupied_count(),
        mesh.quad_count(),
        mesh.vertex_count(),
        start.elapsed()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::engine_state::voxels::{block::orientation::Orientation, chunk::Cell};
    use crate::error::VoxelError;

    fn registry() -> BlockRegistry {
        let mut registry = BlockRegistry::new();
        registry.register("stone", [10; 6], 0).unwrap();
        registry.register("glass", [16; 6], 1).unwrap();
        registry.register("dirt", [13; 6], 0).unwrap();
        registry
    }

    fn place(chunk: &mut Chunk, registry: &BlockRegistry, name: &str, at: (i32, i32, i32), size: (i32, i32, i32)) {
        let block = registry.get(name).unwrap();
        chunk
            .set_region(at.0, at.1, at.2, size.0, size.1, size.2, block, Orientation::DEFAULT)
            .unwrap();
    }

    #[test]
    fn test_empty_chunk_has_empty_mesh() {
        let mesh = greedy(&Chunk::new(), &registry()).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.quad_count(), 0);
    }

    #[test]
    fn test_full_chunk_is_six_quads() {
        let registry = registry();
        let mut chunk = Chunk::new();
        place(&mut chunk, &registry, "stone", (0, 0, 0), (16, 16, 16));

        let mesh = greedy(&chunk, &registry).unwrap();
        assert_eq!(mesh.quad_count(), 6);
        for side in BlockSide::all() {
            assert_eq!(mesh.quads_on(side), 1);
        }
        assert!(mesh.quads().iter().all(|q| q.area() == 256));
    }

    #[test]
    fn test_faces_between_opaque_blocks_are_hidden() {
        let registry = registry();
        let mut chunk = Chunk::new();
        place(&mut chunk, &registry, "stone", (4, 4, 4), (1, 1, 1));
        place(&mut chunk, &registry, "dirt", (5, 4, 4), (1, 1, 1));

        let mesh = greedy(&chunk, &registry).unwrap();
        // Different textures never merge, and the shared X faces are culled.
        assert_eq!(mesh.quad_count(), 10);
        assert_eq!(mesh.quads_on(BlockSide::RIGHT), 1);
        assert_eq!(mesh.quads_on(BlockSide::LEFT), 1);
    }

    #[test]
    fn test_glass_next_to_stone() {
        let registry = registry();
        let mut chunk = Chunk::new();
        place(&mut chunk, &registry, "stone", (4, 4, 4), (1, 1, 1));
        place(&mut chunk, &registry, "glass", (5, 4, 4), (1, 1, 1));

        let mesh = greedy(&chunk, &registry).unwrap();
        // Stone shows its +X face through the glass; glass hides its -X face.
        let right: Vec<_> = mesh
            .quads()
            .iter()
            .filter(|q| q.side == BlockSide::RIGHT)
            .collect();
        assert_eq!(right.len(), 2);
        assert!(right.iter().any(|q| q.slab == 4 && q.layer == 10));
        let left: Vec<_> = mesh
            .quads()
            .iter()
            .filter(|q| q.side == BlockSide::LEFT)
            .collect();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].slab, 4);
    }

    #[test]
    fn test_corrupt_cell_aborts_meshing() {
        let registry = registry();
        let mut chunk = Chunk::new();
        place(&mut chunk, &registry, "stone", (0, 0, 0), (2, 2, 2));
        // Type index 9 was never registered.
        chunk.set_cell(3, 2, 1, Cell::from_raw(10 << 5 | 14)).unwrap();

        let result = greedy(&chunk, &registry);
        assert!(matches!(
            result,
            Err(VoxelError::CorruptCell { x: 3, y: 2, z: 1, .. })
        ));

        // Orientation 4 would put top and front on the same axis.
        let mut chunk = Chunk::new();
        chunk.set_cell(0, 0, 0, Cell::from_raw(1 << 5 | 4)).unwrap();
        assert!(matches!(
            greedy(&chunk, &registry),
            Err(VoxelError::CorruptCell { x: 0, y: 0, z: 0, .. })
        ));
    }

    #[test]
    fn test_quads_cover_each_visible_face_once() {
        let registry = registry();
        let mut chunk = Chunk::new();
        place(&mut chunk, &registry, "stone", (0, 0, 0), (16, 1, 16));
        place(&mut chunk, &registry, "glass", (3, 1, 3), (4, 3, 2));
        place(&mut chunk, &registry, "dirt", (8, 1, 8), (2, 5, 1));

        let mesh = greedy(&chunk, &registry).unwrap();
        let mut seen = std::collections::HashSet::new();
        for quad in mesh.quads() {
            for cell in quad.cells() {
                assert!(seen.insert((quad.side, cell)), "{:?} covered twice", cell);
                assert!(chunk.is_block_solid(cell.x, cell.y, cell.z));
            }
        }
        // The floor stays visible through glass but not under dirt.
        let floor_tops = seen
            .iter()
            .filter(|(side, cell)| *side == BlockSide::TOP && cell.y == 0)
            .count();
        assert_eq!(floor_tops, 256 - 2);
        assert!(seen.contains(&(BlockSide::TOP, Point3::new(3, 3, 3))));
    }
}
