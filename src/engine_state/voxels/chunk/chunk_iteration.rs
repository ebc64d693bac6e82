//! # Chunk Iteration Module
//!
//! This module provides an iterator over the occupied cells of a chunk. It walks the
//! chunk's `solid_array` bit vector, so empty cells are skipped without being read.

use cgmath::Point3;

use super::{Cell, Chunk};

/// An iterator over all occupied cells in a chunk, in linear index order
/// (x fastest, then y, then z).
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next position in the solid array to scan from
    current_solid_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first occupied cell.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_solid_offset: 0,
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, Cell);

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = &self.chunk_ref.solid_array[self.current_solid_offset..];
        let index = self.current_solid_offset + remaining.first_one()?;
        self.current_solid_offset = index + 1;
        Some((Chunk::position(index), self.chunk_ref.cells[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterates_occupied_cells_in_order() {
        let mut chunk = Chunk::new();
        let cell = Cell::from_raw(1 << 5 | 14);
        chunk.set_cell(0, 0, 1, cell).unwrap();
        chunk.set_cell(3, 0, 0, cell).unwrap();
        chunk.set_cell(0, 1, 0, cell).unwrap();

        let positions: Vec<Point3<usize>> = chunk.blocks().map(|(p, _)| p).collect();
        assert_eq!(
            positions,
            vec![
                Point3::new(3, 0, 0),
                Point3::new(0, 1, 0),
                Point3::new(0, 0, 1)
            ]
        );
        assert!(chunk.blocks().all(|(_, c)| c == cell));
    }

    #[test]
    fn test_empty_chunk_yields_nothing() {
        assert_eq!(Chunk::new().blocks().count(), 0);
    }
}
