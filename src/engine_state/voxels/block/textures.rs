//! # Texture Table
//!
//! Names of the layers in the block texture array, compiled into a perfect hash map so
//! scene configs can refer to textures by name.

use crate::error::{Result, VoxelError};

/// Maps a texture name to its layer in the block texture array.
pub static TEXTURE_LAYERS: phf::Map<&'static str, u16> = phf::phf_map! {
    "barrel_top" => 0,
    "barrel_side" => 1,
    "barrel_bottom" => 2,
    "barrel_open" => 3,
    "bookshelf" => 4,
    "oak_planks" => 5,
    "oak_log" => 6,
    "oak_end" => 7,
    "stripped_oak_log" => 8,
    "stripped_oak_end" => 9,
    "stone" => 10,
    "grass_block_top" => 11,
    "grass_block_side" => 12,
    "dirt_block" => 13,
    "hay_top" => 14,
    "hay_side" => 15,
    "glass" => 16,
    "furnace_bottom" => 17,
    "furnace_side" => 18,
    "furnace_front" => 19,
    "furnace_front_on" => 20,
    "music_box_top" => 21,
    "music_box_side" => 22,
    "loom_top" => 23,
    "loom_front" => 24,
    "loom_side" => 25,
    "cobblestone" => 26,
    "crafting_table_top" => 27,
    "crafting_table_front" => 28,
    "crafting_table_side" => 29,
    "pumpkin_top" => 30,
    "pumpkin_side" => 31,
};

/// Resolves a texture name to its layer.
pub fn texture_layer(name: &str) -> Result<u16> {
    TEXTURE_LAYERS
        .get(name)
        .copied()
        .ok_or_else(|| VoxelError::UnknownTexture(name.to_string()))
}
