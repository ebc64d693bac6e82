//! # Scene Configuration
//!
//! A scene is described by the blocks it registers, the regions it fills and the drift
//! timer settings. Configs are plain JSON; `SceneConfig::default()` is the log cabin demo
//! scene.
//!
//! ```json
//! {
//!   "drift_interval_ms": 250,
//!   "seed": 7,
//!   "blocks": [
//!     { "name": "stone", "faces": ["stone", "stone", "stone", "stone", "stone", "stone"] },
//!     { "name": "glass", "faces": [16, 16, 16, 16, 16, 16], "transparency": 1 }
//!   ],
//!   "regions": [
//!     { "block": "stone", "origin": [0, 0, 0], "size": [16, 1, 16] },
//!     { "block": "glass", "origin": [4, 1, 4], "size": [1, 1, 1], "orientation": 14 }
//!   ]
//! }
//! ```

use std::{fs, path::Path, time::Duration};

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::block::{
    orientation::Orientation, registry::BlockRegistry, textures::texture_layer,
};
use crate::error::Result;

fn default_drift_interval_ms() -> u64 {
    500
}

/// A face texture given either as an atlas layer or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextureRef {
    /// An atlas layer index.
    Layer(u16),
    /// A texture name from the atlas table.
    Name(String),
}

impl TextureRef {
    /// Atlas layer this reference points to.
    ///
    /// # Errors
    /// `UnknownTexture` for a name missing from the atlas table.
    pub fn resolve(&self) -> Result<u16> {
        match self {
            TextureRef::Layer(layer) => Ok(*layer),
            TextureRef::Name(name) => texture_layer(name),
        }
    }
}

impl From<&str> for TextureRef {
    fn from(name: &str) -> Self {
        TextureRef::Name(name.to_string())
    }
}

/// One block type as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
    /// Unique block name regions refer to.
    pub name: String,
    /// [right, left, top, bottom, front, back]
    pub faces: [TextureRef; 6],
    /// 0 is opaque; defaults to 0.
    #[serde(default)]
    pub transparency: u8,
}

/// A box of cells filled with one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Name of a block declared in `blocks`.
    pub block: String,
    /// Minimum corner `[x, y, z]`.
    pub origin: [i32; 3],
    /// Extent `[w, h, d]` in cells.
    pub size: [i32; 3],
    /// Orientation index; the identity rotation when absent.
    #[serde(default)]
    pub orientation: Option<u8>,
}

impl RegionConfig {
    /// The region orientation, validated.
    pub fn orientation(&self) -> Result<Orientation> {
        match self.orientation {
            Some(index) => Orientation::from_index(index),
            None => Ok(Orientation::DEFAULT),
        }
    }
}

/// A complete scene: block types, placed regions and drift settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Milliseconds between drift ticks.
    #[serde(default = "default_drift_interval_ms")]
    pub drift_interval_ms: u64,
    /// Seed for the drift driver; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Block types in registration order.
    pub blocks: Vec<BlockConfig>,
    /// Regions filled in order; later regions overwrite earlier ones.
    #[serde(default)]
    pub regions: Vec<RegionConfig>,
}

impl SceneConfig {
    /// Parses a scene from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        info!(
            "Loaded scene {} ({} blocks, {} regions)",
            path.display(),
            config.blocks.len(),
            config.regions.len()
        );
        Ok(config)
    }

    /// Serializes the scene as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Interval between drift ticks.
    pub fn drift_interval(&self) -> Duration {
        Duration::from_millis(self.drift_interval_ms)
    }

    /// Registers every configured block, in order.
    pub fn build_registry(&self) -> Result<BlockRegistry> {
        let mut registry = BlockRegistry::new();
        for block in &self.blocks {
            let mut faces = [0; 6];
            for (layer, texture) in faces.iter_mut().zip(&block.faces) {
                *layer = texture.resolve()?;
            }
            registry.register(&block.name, faces, block.transparency)?;
        }
        Ok(registry)
    }
}

fn block(name: &str, faces: [&str; 6]) -> BlockConfig {
    BlockConfig {
        name: name.to_string(),
        faces: faces.map(TextureRef::from),
        transparency: 0,
    }
}

fn region(block: &str, origin: [i32; 3], size: [i32; 3]) -> RegionConfig {
    RegionConfig {
        block: block.to_string(),
        origin,
        size,
        orientation: None,
    }
}

impl Default for SceneConfig {
    /// A small log cabin on a grass field, with pumpkins, furniture and glass windows.
    fn default() -> Self {
        let blocks = vec![
            block("barrel", ["barrel_side", "barrel_side", "barrel_top", "barrel_bottom", "barrel_side", "barrel_side"]),
            block("barrel_open", ["barrel_side", "barrel_side", "barrel_open", "barrel_bottom", "barrel_side", "barrel_side"]),
            block("bookshelf", ["bookshelf", "bookshelf", "oak_planks", "oak_planks", "bookshelf", "bookshelf"]),
            block("cobblestone", ["cobblestone"; 6]),
            block("crafting_table", ["crafting_table_side", "crafting_table_side", "crafting_table_top", "oak_planks", "crafting_table_front", "crafting_table_side"]),
            block("dirt", ["dirt_block"; 6]),
            block("furnace", ["furnace_side", "furnace_side", "furnace_bottom", "furnace_bottom", "furnace_side", "furnace_front"]),
            block("furnace_on", ["furnace_side", "furnace_side", "furnace_bottom", "furnace_bottom", "furnace_side", "furnace_front_on"]),
            BlockConfig {
                transparency: 1,
                ..block("glass", ["glass"; 6])
            },
            block("grass", ["grass_block_side", "grass_block_side", "grass_block_top", "dirt_block", "grass_block_side", "grass_block_side"]),
            block("hay", ["hay_side", "hay_side", "hay_top", "hay_top", "hay_side", "hay_side"]),
            block("loom", ["loom_side", "loom_side", "loom_top", "oak_planks", "loom_front", "loom_side"]),
            block("music_box", ["music_box_side", "music_box_side", "music_box_top", "music_box_top", "music_box_side", "music_box_side"]),
            block("oak_log", ["oak_log", "oak_log", "oak_end", "oak_end", "oak_log", "oak_log"]),
            block("oak_planks", ["oak_planks"; 6]),
            block("pumpkin", ["pumpkin_side", "pumpkin_side", "pumpkin_top", "pumpkin_top", "pumpkin_side", "pumpkin_side"]),
            block("stone", ["stone"; 6]),
            block("stripped_oak", ["stripped_oak_log", "stripped_oak_log", "stripped_oak_end", "stripped_oak_end", "stripped_oak_log", "stripped_oak_log"]),
        ];

        let regions = vec![
            // Ground
            region("stone", [0, 0, 0], [16, 1, 16]),
            region("dirt", [0, 1, 0], [16, 1, 16]),
            region("grass", [0, 2, 0], [5, 1, 16]),
            region("grass", [14, 2, 0], [2, 1, 16]),
            region("grass", [5, 2, 0], [9, 1, 4]),
            region("grass", [5, 2, 11], [9, 1, 5]),
            region("cobblestone", [5, 2, 4], [9, 1, 7]),
            // Cabin frame
            region("oak_log", [5, 3, 4], [1, 5, 1]),
            region("oak_log", [5, 3, 10], [1, 5, 1]),
            region("oak_log", [13, 3, 4], [1, 5, 1]),
            region("oak_log", [13, 3, 10], [1, 5, 1]),
            region("stripped_oak", [5, 3, 5], [1, 2, 5]),
            region("stripped_oak", [5, 6, 5], [1, 2, 5]),
            region("stripped_oak", [5, 8, 6], [1, 1, 3]),
            region("stripped_oak", [5, 9, 7], [1, 1, 1]),
            region("glass", [5, 5, 5], [1, 1, 5]),
            // North wall
            region("oak_planks", [6, 3, 4], [1, 5, 1]),
            region("oak_planks", [12, 3, 4], [1, 5, 1]),
            region("oak_planks", [7, 3, 4], [5, 1, 1]),
            region("oak_planks", [7, 6, 4], [5, 2, 1]),
            region("glass", [7, 4, 4], [5, 2, 1]),
            // South wall
            region("oak_planks", [6, 3, 10], [1, 5, 1]),
            region("oak_planks", [12, 3, 10], [1, 5, 1]),
            region("oak_planks", [7, 3, 10], [5, 1, 1]),
            region("oak_planks", [7, 6, 10], [5, 2, 1]),
            region("glass", [7, 4, 10], [5, 2, 1]),
            region("oak_planks", [7, 6, 10], [5, 2, 1]),
            // Pumpkin patch
            region("pumpkin", [1, 3, 2], [1, 1, 1]),
            region("pumpkin", [2, 3, 4], [1, 1, 1]),
            region("pumpkin", [3, 3, 3], [1, 1, 1]),
            region("pumpkin", [2, 3, 2], [1, 1, 1]),
            region("pumpkin", [4, 3, 1], [1, 1, 1]),
            // Furnishing
            region("hay", [6, 3, 5], [2, 2, 3]),
            region("barrel", [8, 3, 5], [1, 1, 1]),
            region("barrel_open", [6, 3, 8], [1, 1, 1]),
            region("bookshelf", [6, 3, 9], [2, 3, 1]),
            region("furnace", [9, 3, 9], [1, 1, 1]),
            region("furnace_on", [10, 3, 9], [1, 1, 1]),
            region("music_box", [11, 3, 9], [1, 1, 1]),
            region("loom", [11, 3, 5], [1, 1, 1]),
            region("crafting_table", [12, 3, 5], [1, 1, 1]),
        ];

        SceneConfig {
            drift_interval_ms: default_drift_interval_ms(),
            seed: None,
            blocks,
            regions,
        }
    }
}
