//! # Cell Module
//!
//! A cell is the 16-bit value stored at each grid position: 0 for empty, otherwise
//! `(type_index + 1) << 5 | orientation`.

use crate::engine_state::voxels::block::{
    orientation::{Orientation, ORIENTATION_BITS, ORIENTATION_MASK},
    registry::MAX_BLOCKS,
    BlockTypeSize,
};
use crate::error::{Result, VoxelError};

/// A single encoded grid cell.
///
/// # Memory Layout
/// `#[repr(transparent)]` over `u16` so a whole chunk can be viewed as a `&[u16]`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Cell(u16);

impl Cell {
    /// The empty cell.
    pub const EMPTY: Cell = Cell(0);

    /// Encodes a block type index and orientation.
    pub fn new(type_index: BlockTypeSize, orientation: Orientation) -> Result<Self> {
        if type_index as usize >= MAX_BLOCKS {
            return Err(VoxelError::RegistryFull(MAX_BLOCKS));
        }
        Ok(Cell(
            (type_index + 1) << ORIENTATION_BITS | orientation.index() as u16,
        ))
    }

    /// Wraps a raw value without validating it. Decoding happens at meshing time.
    pub fn from_raw(raw: u16) -> Self {
        Cell(raw)
    }

    /// The encoded value.
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Whether the cell holds no block.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw type index and orientation bits, or `None` for an empty cell.
    ///
    /// A non-empty cell whose type bits are zero decodes to `None` as well; it is
    /// reported as corrupt by `decode`.
    pub fn parts(self) -> Option<(BlockTypeSize, u8)> {
        let type_bits = self.0 >> ORIENTATION_BITS;
        if type_bits == 0 {
            return None;
        }
        Some((type_bits - 1, (self.0 & ORIENTATION_MASK) as u8))
    }

    /// Fully decodes a non-empty cell.
    ///
    /// # Errors
    /// `InvalidOrientation` if the orientation bits are a same-axis pair, or if orientation
    /// bits are set on a cell without type bits.
    pub fn decode(self) -> Result<Option<(BlockTypeSize, Orientation)>> {
        if self.is_empty() {
            return Ok(None);
        }
        match self.parts() {
            Some((type_index, orientation)) => {
                Ok(Some((type_index, Orientation::from_index(orientation)?)))
            }
            None => Err(VoxelError::InvalidOrientation(format!(
                "orientation bits {:#x} on a cell without a block type",
                self.0
            ))),
        }
    }
}
