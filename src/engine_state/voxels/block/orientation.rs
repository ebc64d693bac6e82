//! # Orientation Module
//!
//! A block rotation is a pair of sides: where the block's top points and where its front
//! points. The two must lie on different axes, which leaves 24 rotations. They are stored
//! in the low 5 bits of a cell as `top * 6 + front - 2`. Indices 0..=31 span the pairs from
//! (RIGHT, TOP) to (BACK, BOTTOM); the 8 same-axis pairs inside that range are rejected and
//! the remaining same-axis pairs fall outside it.

use crate::error::{Result, VoxelError};

use super::block_side::BlockSide;

/// Number of bits a cell reserves for the orientation index.
pub const ORIENTATION_BITS: u16 = 5;
/// Mask selecting the orientation bits of a cell.
pub const ORIENTATION_MASK: u16 = (1 << ORIENTATION_BITS) - 1;

/// One of the 24 valid block rotations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Orientation(u8);

impl Orientation {
    /// Top facing up, front facing +Z. Block-local faces equal world faces.
    pub const DEFAULT: Orientation = Orientation(14);

    /// Builds the rotation whose top and front point along the given sides.
    pub fn new(top: BlockSide, front: BlockSide) -> Result<Self> {
        if top.axis() == front.axis() {
            return Err(VoxelError::InvalidOrientation(format!(
                "top {:?} and front {:?} share an axis",
                top, front
            )));
        }
        Ok(Orientation((top as u8) * 6 + front as u8 - 2))
    }

    /// Decodes a 5-bit orientation index, rejecting the same-axis combinations.
    pub fn from_index(index: u8) -> Result<Self> {
        if index as u16 > ORIENTATION_MASK {
            return Err(VoxelError::InvalidOrientation(format!(
                "index {} does not fit in {} bits",
                index, ORIENTATION_BITS
            )));
        }
        let (top, front) = Self::split(index);
        match (BlockSide::from_index(top), BlockSide::from_index(front)) {
            (Some(top), Some(front)) if top.axis() != front.axis() => Ok(Orientation(index)),
            _ => Err(VoxelError::InvalidOrientation(format!(
                "index {} pairs top {} with front {}",
                index, top, front
            ))),
        }
    }

    fn split(index: u8) -> (u8, u8) {
        let shifted = index + 2;
        (shifted / 6, shifted % 6)
    }

    /// Every valid orientation in ascending index order.
    pub fn all() -> impl Iterator<Item = Orientation> {
        (0..=ORIENTATION_MASK as u8).filter_map(|index| Self::from_index(index).ok())
    }

    /// The 5-bit index stored in cells.
    pub fn index(self) -> u8 {
        self.0
    }

    /// Direction the block's top points.
    pub fn top(self) -> BlockSide {
        // Both halves were validated on construction.
        BlockSide::from_index(Self::split(self.0).0).unwrap_or(BlockSide::TOP)
    }

    /// Direction the block's front points.
    pub fn front(self) -> BlockSide {
        BlockSide::from_index(Self::split(self.0).1).unwrap_or(BlockSide::FRONT)
    }

    /// The side pointing along block-local +X, i.e. `top × front`.
    pub fn right(self) -> BlockSide {
        let right = self.top().normal().cross(self.front().normal());
        BlockSide::from_normal(right).unwrap_or(BlockSide::RIGHT)
    }

    /// Which of the block's own faces ends up pointing along `world`.
    ///
    /// The result indexes the block's six face textures.
    pub fn local_side(self, world: BlockSide) -> BlockSide {
        let (right, top, front) = (self.right(), self.top(), self.front());
        if world == right {
            BlockSide::RIGHT
        } else if world == right.opposite() {
            BlockSide::LEFT
        } else if world == top {
            BlockSide::TOP
        } else if world == top.opposite() {
            BlockSide::BOTTOM
        } else if world == front {
            BlockSide::FRONT
        } else {
            BlockSide::BACK
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_24_orientations() {
        assert_eq!(Orientation::all().count(), 24);
        let invalid: Vec<u8> = (0..32)
            .filter(|i| Orientation::from_index(*i).is_err())
            .collect();
        assert_eq!(invalid, vec![4, 5, 12, 13, 18, 19, 26, 27]);
        assert!(Orientation::from_index(32).is_err());
    }

    #[test]
    fn test_pair_round_trip() {
        for orientation in Orientation::all() {
            let rebuilt = Orientation::new(orientation.top(), orientation.front()).unwrap();
            assert_eq!(rebuilt, orientation);
        }
    }

    #[test]
    fn test_same_axis_rejected() {
        assert!(Orientation::new(BlockSide::TOP, BlockSide::BOTTOM).is_err());
        assert!(Orientation::new(BlockSide::RIGHT, BlockSide::RIGHT).is_err());
    }

    #[test]
    fn test_default_is_identity() {
        let orientation = Orientation::DEFAULT;
        assert_eq!(orientation.top(), BlockSide::TOP);
        assert_eq!(orientation.front(), BlockSide::FRONT);
        assert_eq!(orientation.right(), BlockSide::RIGHT);
        for side in BlockSide::all() {
            assert_eq!(orientation.local_side(side), side);
        }
    }

    #[test]
    fn test_local_sides_form_permutation() {
        for orientation in Orientation::all() {
            let mut seen = [false; 6];
            for side in BlockSide::all() {
                seen[orientation.local_side(side) as usize] = true;
            }
            assert!(seen.iter().all(|s| *s), "{:?}", orientation);
            assert_eq!(orientation.local_side(orientation.top()), BlockSide::TOP);
            assert_eq!(orientation.local_side(orientation.front()), BlockSide::FRONT);
        }
    }
}
