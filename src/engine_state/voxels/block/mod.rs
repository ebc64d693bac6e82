//! # Block Module
//!
//! This module provides the block-related building blocks of the chunk core: the six
//! block sides, the 24 block orientations, the texture table and the append-only block
//! registry that hands out type indices.

use orientation::Orientation;

use block_side::BlockSide;

pub mod block_side;
pub mod orientation;
pub mod registry;
pub mod textures;

/// The underlying integer type used to represent block type indices.
pub type BlockTypeSize = u16;

/// Highest texture layer that fits into the packed vertex metadata.
pub const MAX_TEXTURE_LAYER: u16 = 1023;

/// An immutable block definition as handed out by the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockDef {
    /// Name the block was registered under.
    pub name: String,
    /// Texture layer for each block-local face, in `BlockSide` order:
    /// [right, left, top, bottom, front, back].
    pub faces: [u16; 6],
    /// 0 is opaque; higher values are more transparent.
    pub transparency: u8,
    /// Registration order, starting at 0.
    pub type_index: BlockTypeSize,
}

impl BlockDef {
    /// Texture layer visible on the world-space `side` of a block placed with `orientation`.
    pub fn face_texture(&self, side: BlockSide, orientation: Orientation) -> u16 {
        self.faces[orientation.local_side(side) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_texture_follows_orientation() {
        let furnace = BlockDef {
            name: "furnace".to_string(),
            faces: [18, 18, 17, 17, 18, 19],
            transparency: 0,
            type_index: 0,
        };
        assert_eq!(furnace.face_texture(BlockSide::BACK, Orientation::DEFAULT), 19);

        // Front toward +X: the back-slot texture now shows on the -X side.
        let turned = Orientation::new(BlockSide::TOP, BlockSide::RIGHT).unwrap();
        assert_eq!(furnace.face_texture(BlockSide::RIGHT, turned), 18);
        assert_eq!(furnace.face_texture(BlockSide::LEFT, turned), 19);
        assert_eq!(furnace.face_texture(BlockSide::TOP, turned), 17);
    }
}
