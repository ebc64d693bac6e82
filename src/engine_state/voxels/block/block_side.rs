//! # Block Side Module
//!
//! This module defines the six axis-aligned faces of a voxel block. The discriminant of
//! each side doubles as the face/normal index packed into vertex metadata, so the order
//! here is part of the GPU contract.

use cgmath::Vector3;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK], i.e. +X, -X, +Y, -Y, +Z, -Z.
/// Bit 0 of the discriminant is the sign (set = negative), bits 1-2 the axis.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, FromPrimitive)]
pub enum BlockSide {
    /// The right face (facing positive X, "east")
    RIGHT = 0,

    /// The left face (facing negative X, "west")
    LEFT = 1,

    /// The top face (facing positive Y, "up")
    TOP = 2,

    /// The bottom face (facing negative Y, "down")
    BOTTOM = 3,

    /// The front face (facing positive Z, "south")
    FRONT = 4,

    /// The back face (facing negative Z, "north")
    BACK = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in normal-index order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// Converts a normal index (0..6) back into a side.
    pub fn from_index(index: u8) -> Option<Self> {
        FromPrimitive::from_u8(index)
    }

    /// The coordinate axis this side is perpendicular to (0 = X, 1 = Y, 2 = Z).
    pub fn axis(self) -> usize {
        self as usize >> 1
    }

    /// Whether the side faces along the negative direction of its axis.
    pub fn is_negative(self) -> bool {
        self as usize & 1 == 1
    }

    /// The side facing the other way along the same axis.
    pub fn opposite(self) -> Self {
        match self {
            BlockSide::RIGHT => BlockSide::LEFT,
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::BOTTOM => BlockSide::TOP,
            BlockSide::FRONT => BlockSide::BACK,
            BlockSide::BACK => BlockSide::FRONT,
        }
    }

    /// Outward unit normal of this side.
    ///
    /// Mirrors the shader-side unpack: bit 2 selects Z, bit 1 selects Y, otherwise X,
    /// and bit 0 flips the sign.
    pub fn normal(self) -> Vector3<i32> {
        let index = self as i32;
        let sign = if index & 1 == 1 { -1 } else { 1 };
        if index & 4 == 4 {
            Vector3::new(0, 0, sign)
        } else if index & 2 == 2 {
            Vector3::new(0, sign, 0)
        } else {
            Vector3::new(sign, 0, 0)
        }
    }

    /// Finds the side whose normal equals `normal`, if it is a unit axis vector.
    pub fn from_normal(normal: Vector3<i32>) -> Option<Self> {
        Self::all().into_iter().find(|side| side.normal() == normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for side in BlockSide::all() {
            assert_eq!(BlockSide::from_index(side as u8), Some(side));
        }
        assert_eq!(BlockSide::from_index(6), None);
    }

    #[test]
    fn test_normals_are_unit_axes() {
        assert_eq!(BlockSide::RIGHT.normal(), Vector3::new(1, 0, 0));
        assert_eq!(BlockSide::LEFT.normal(), Vector3::new(-1, 0, 0));
        assert_eq!(BlockSide::TOP.normal(), Vector3::new(0, 1, 0));
        assert_eq!(BlockSide::BOTTOM.normal(), Vector3::new(0, -1, 0));
        assert_eq!(BlockSide::FRONT.normal(), Vector3::new(0, 0, 1));
        assert_eq!(BlockSide::BACK.normal(), Vector3::new(0, 0, -1));
    }

    #[test]
    fn test_opposite_shares_axis() {
        for side in BlockSide::all() {
            let opposite = side.opposite();
            assert_eq!(side.axis(), opposite.axis());
            assert_ne!(side.is_negative(), opposite.is_negative());
            assert_eq!(side.normal() + opposite.normal(), Vector3::new(0, 0, 0));
            assert_eq!(BlockSide::from_normal(side.normal()), Some(side));
        }
    }
}
