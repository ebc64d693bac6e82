//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed 16x16x16 grid of encoded cells,
//! linear-indexed as `x | y << 4 | z << 8`. A chunk is allocated once and mutated in
//! place by region placement and by the drift driver; it is never resized.
//!
//! ## Storage
//!
//! Alongside the cells the chunk keeps `solid_array`, a bit vector with one bit per cell
//! that is set when the cell is occupied. It gives O(1) solidity checks and lets the drift
//! driver pick a uniformly random occupied cell without rejection sampling.
//!
//! ## Bounds Policy
//!
//! Region writes that leave the grid are rejected with `OutOfBounds` and write nothing.
//! Reads outside the grid return `Cell::EMPTY`.

use bitvec::prelude::BitVec;
use cgmath::Point3;
use log::debug;

use crate::error::{Result, VoxelError};

use super::block::{block_side::BlockSide, orientation::Orientation, BlockDef};

pub use cell::Cell;
pub use chunk_iteration::ChunkBlockIterator;

mod cell;
pub mod chunk_iteration;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: usize = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: usize = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: usize = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

const Y_SHIFT: usize = 4;
const Z_SHIFT: usize = 8;

/// A 16x16x16 grid of voxel cells.
#[derive(Clone, Debug)]
pub struct Chunk {
    cells: Vec<Cell>,
    /// One bit per cell, set when the cell is occupied. Indexed like `cells`.
    solid_array: BitVec,
}

impl Chunk {
    /// Creates a new, completely empty chunk.
    pub fn new() -> Self {
        Chunk {
            cells: vec![Cell::EMPTY; CHUNK_SIZE],
            solid_array: BitVec::repeat(false, CHUNK_SIZE),
        }
    }

    /// Linear index of an in-bounds position.
    #[inline]
    pub fn index(x: usize, y: usize, z: usize) -> usize {
        x | y << Y_SHIFT | z << Z_SHIFT
    }

    /// Inverse of `index`.
    #[inline]
    pub fn position(index: usize) -> Point3<usize> {
        let mask = CHUNK_DIMENSION - 1;
        Point3::new(index & mask, (index >> Y_SHIFT) & mask, (index >> Z_SHIFT) & mask)
    }

    /// Whether signed coordinates name a cell of the grid.
    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        let dim = CHUNK_DIMENSION as i32;
        (0..dim).contains(&x) && (0..dim).contains(&y) && (0..dim).contains(&z)
    }

    /// Whether a grid position lies inside the grid.
    #[inline]
    pub fn contains(position: Point3<usize>) -> bool {
        position.x < CHUNK_DIMENSION && position.y < CHUNK_DIMENSION && position.z < CHUNK_DIMENSION
    }

    /// Returns the cell at the given coordinates, or `Cell::EMPTY` outside the grid.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Cell {
        if Self::in_bounds(x, y, z) {
            self.cells[Self::index(x as usize, y as usize, z as usize)]
        } else {
            Cell::EMPTY
        }
    }

    /// Returns the cell at a grid position, or `Cell::EMPTY` outside the grid.
    #[inline]
    pub fn get_at(&self, position: Point3<usize>) -> Cell {
        if Self::contains(position) {
            self.cells[Self::index(position.x, position.y, position.z)]
        } else {
            Cell::EMPTY
        }
    }

    /// The neighbor of `position` across `side`, or `None` when that lies outside the grid.
    pub fn neighbor(&self, position: Point3<usize>, side: BlockSide) -> Option<Cell> {
        if !Self::contains(position) {
            return None;
        }
        let normal = side.normal();
        let (x, y, z) = (
            position.x as i32 + normal.x,
            position.y as i32 + normal.y,
            position.z as i32 + normal.z,
        );
        Self::in_bounds(x, y, z).then(|| self.get(x, y, z))
    }

    /// Whether the cell at `(x, y, z)` holds a block. False outside the grid.
    pub fn is_block_solid(&self, x: usize, y: usize, z: usize) -> bool {
        Self::contains(Point3::new(x, y, z)) && self.solid_array[Self::index(x, y, z)]
    }

    /// Writes a single cell.
    ///
    /// The value is not validated; the mesher reports undecodable cells as corrupt.
    pub fn set_cell(&mut self, x: i32, y: i32, z: i32, cell: Cell) -> Result<()> {
        if !Self::in_bounds(x, y, z) {
            return Err(out_of_bounds(x, y, z, 1, 1, 1));
        }
        self.write(Self::index(x as usize, y as usize, z as usize), cell);
        Ok(())
    }

    /// Fills the box `[x, x+w) × [y, y+h) × [z, z+d)` with `block` in `orientation`.
    ///
    /// # Errors
    /// `OutOfBounds` if any part of the box lies outside the grid or an extent is negative.
    /// Nothing is written in that case. A box with a zero extent writes nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn set_region(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        w: i32,
        h: i32,
        d: i32,
        block: &BlockDef,
        orientation: Orientation,
    ) -> Result<()> {
        let dim = CHUNK_DIMENSION as i32;
        let fits = |origin: i32, extent: i32| origin >= 0 && extent >= 0 && extent <= dim - origin;
        if !(fits(x, w) && fits(y, h) && fits(z, d)) {
            return Err(out_of_bounds(x, y, z, w, h, d));
        }

        let cell = Cell::new(block.type_index, orientation)?;
        for k in z..z + d {
            for j in y..y + h {
                for i in x..x + w {
                    self.write(Self::index(i as usize, j as usize, k as usize), cell);
                }
            }
        }
        debug!(
            "Placed {} at ({}, {}, {}) size {}x{}x{}",
            block.name, x, y, z, w, h, d
        );
        Ok(())
    }

    /// Moves the block at `from` to the empty cell `to`, leaving `from` empty.
    ///
    /// Moving an empty cell is a no-op.
    ///
    /// # Errors
    /// `OutOfBounds` if either position is outside the grid, `Occupied` if `to` already
    /// holds a block.
    pub fn move_cell(&mut self, from: Point3<usize>, to: Point3<usize>) -> Result<()> {
        for p in [from, to] {
            if !Self::contains(p) {
                let coord = |c: usize| i32::try_from(c).unwrap_or(i32::MAX);
                return Err(out_of_bounds(coord(p.x), coord(p.y), coord(p.z), 1, 1, 1));
            }
        }
        if !self.get_at(to).is_empty() {
            return Err(VoxelError::Occupied {
                x: to.x,
                y: to.y,
                z: to.z,
            });
        }

        let cell = self.get_at(from);
        self.write(Self::index(to.x, to.y, to.z), cell);
        self.write(Self::index(from.x, from.y, from.z), Cell::EMPTY);
        Ok(())
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.solid_array.count_ones()
    }

    /// Position of the `n`-th occupied cell in linear index order.
    pub fn nth_occupied(&self, n: usize) -> Option<Point3<usize>> {
        self.solid_array.iter_ones().nth(n).map(Self::position)
    }

    /// Iterates over occupied cells and their positions.
    pub fn blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// The raw cell values in linear index order.
    pub fn as_raw(&self) -> &[u16] {
        bytemuck::cast_slice(&self.cells)
    }

    fn write(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
        self.solid_array.set(index, !cell.is_empty());
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

fn out_of_bounds(x: i32, y: i32, z: i32, w: i32, h: i32, d: i32) -> VoxelError {
    VoxelError::OutOfBounds {
        x,
        y,
        z,
        w,
        h,
        d,
        dimension: CHUNK_DIMENSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stone() -> BlockDef {
        BlockDef {
            name: "stone".to_string(),
            faces: [10; 6],
            transparency: 0,
            type_index: 0,
        }
    }

    #[test]
    fn test_index_layout() {
        assert_eq!(Chunk::index(1, 0, 0), 1);
        assert_eq!(Chunk::index(0, 1, 0), 16);
        assert_eq!(Chunk::index(0, 0, 1), 256);
        assert_eq!(Chunk::position(Chunk::index(3, 7, 15)), Point3::new(3, 7, 15));
    }

    #[test]
    fn test_set_region_and_get() {
        let mut chunk = Chunk::new();
        chunk
            .set_region(2, 3, 4, 2, 1, 3, &stone(), Orientation::DEFAULT)
            .unwrap();
        assert_eq!(chunk.occupied_count(), 6);
        assert!(!chunk.get(3, 3, 6).is_empty());
        assert!(chunk.get(4, 3, 6).is_empty());
        assert!(chunk.is_block_solid(2, 3, 4));
        assert_eq!(
            chunk.get(2, 3, 4).decode().unwrap(),
            Some((0, Orientation::DEFAULT))
        );
    }

    #[test]
    fn test_out_of_range_reads_are_empty() {
        let mut chunk = Chunk::new();
        chunk
            .set_region(0, 0, 0, 16, 16, 16, &stone(), Orientation::DEFAULT)
            .unwrap();
        assert!(chunk.get(-1, 0, 0).is_empty());
        assert!(chunk.get(0, 16, 0).is_empty());
        assert!(chunk.get(0, 0, 99).is_empty());
        assert_eq!(chunk.neighbor(Point3::new(15, 0, 0), BlockSide::RIGHT), None);
        assert!(chunk.neighbor(Point3::new(14, 0, 0), BlockSide::RIGHT).is_some());
    }

    #[test]
    fn test_region_fully_outside_rejected() {
        let mut chunk = Chunk::new();
        let result = chunk.set_region(20, 0, 0, 2, 2, 2, &stone(), Orientation::DEFAULT);
        assert!(matches!(result, Err(VoxelError::OutOfBounds { .. })));
        assert_eq!(chunk.occupied_count(), 0);
    }

    #[test]
    fn test_region_partially_outside_rejected() {
        let mut chunk = Chunk::new();
        let result = chunk.set_region(14, 0, 0, 4, 1, 1, &stone(), Orientation::DEFAULT);
        assert!(matches!(result, Err(VoxelError::OutOfBounds { .. })));
        let result = chunk.set_region(-1, 0, 0, 2, 1, 1, &stone(), Orientation::DEFAULT);
        assert!(matches!(result, Err(VoxelError::OutOfBounds { .. })));
        assert_eq!(chunk.occupied_count(), 0);
    }

    #[test]
    fn test_region_far_outside_rejected() {
        let mut chunk = Chunk::new();
        for (x, w) in [(i32::MAX, 1), (1, i32::MAX), (i32::MAX, i32::MAX), (i32::MIN, 1)] {
            let result = chunk.set_region(x, 0, 0, w, 1, 1, &stone(), Orientation::DEFAULT);
            assert!(matches!(result, Err(VoxelError::OutOfBounds { .. })), "x={} w={}", x, w);
        }
        let result = chunk.set_region(0, 0, 0, 1, 1, -1, &stone(), Orientation::DEFAULT);
        assert!(matches!(result, Err(VoxelError::OutOfBounds { .. })));
        assert_eq!(chunk.occupied_count(), 0);
    }

    #[test]
    fn test_move_cell_to_huge_coordinate_rejected() {
        let mut chunk = Chunk::new();
        chunk.set_cell(0, 0, 0, Cell::from_raw(1 << 5 | 14)).unwrap();

        let far = Point3::new(usize::MAX, 0, 0);
        let result = chunk.move_cell(Point3::new(0, 0, 0), far);
        assert!(matches!(
            result,
            Err(VoxelError::OutOfBounds { x: i32::MAX, y: 0, z: 0, .. })
        ));
        let result = chunk.move_cell(far, Point3::new(1, 0, 0));
        assert!(matches!(result, Err(VoxelError::OutOfBounds { .. })));
        assert!(!chunk.get(0, 0, 0).is_empty());
        assert_eq!(chunk.occupied_count(), 1);

        assert!(!Chunk::contains(far));
        assert_eq!(chunk.neighbor(far, BlockSide::LEFT), None);
        assert!(chunk.get_at(far).is_empty());
        assert!(!chunk.is_block_solid(usize::MAX, 0, 0));
        // 16 would alias into the next row without the grid check.
        chunk.set_cell(0, 1, 0, Cell::from_raw(1 << 5 | 14)).unwrap();
        assert!(chunk.get_at(Point3::new(16, 0, 0)).is_empty());
        assert!(!chunk.is_block_solid(16, 0, 0));
    }

    #[test]
    fn test_move_cell() {
        let mut chunk = Chunk::new();
        chunk
            .set_region(0, 0, 0, 2, 1, 1, &stone(), Orientation::DEFAULT)
            .unwrap();
        let original = chunk.get(0, 0, 0);

        chunk
            .move_cell(Point3::new(0, 0, 0), Point3::new(0, 1, 0))
            .unwrap();
        assert!(chunk.get(0, 0, 0).is_empty());
        assert_eq!(chunk.get(0, 1, 0), original);
        assert_eq!(chunk.occupied_count(), 2);

        let result = chunk.move_cell(Point3::new(0, 1, 0), Point3::new(1, 0, 0));
        assert!(matches!(result, Err(VoxelError::Occupied { x: 1, y: 0, z: 0 })));
        let result = chunk.move_cell(Point3::new(0, 1, 0), Point3::new(16, 0, 0));
        assert!(matches!(result, Err(VoxelError::OutOfBounds { .. })));
    }

    #[test]
    fn test_nth_occupied() {
        let mut chunk = Chunk::new();
        chunk.set_cell(5, 0, 0, Cell::from_raw(1 << 5 | 14)).unwrap();
        chunk.set_cell(0, 2, 0, Cell::from_raw(1 << 5 | 14)).unwrap();
        assert_eq!(chunk.nth_occupied(0), Some(Point3::new(5, 0, 0)));
        assert_eq!(chunk.nth_occupied(1), Some(Point3::new(0, 2, 0)));
        assert_eq!(chunk.nth_occupied(2), None);
        assert_eq!(chunk.as_raw()[32], 1 << 5 | 14);
    }
}
