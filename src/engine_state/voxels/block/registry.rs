//! # Block Registry Module
//!
//! The registry maps block names to their definitions. Type indices are handed out in
//! registration order by an explicit `register` call, so the index of a block is part of
//! the visible contract rather than an accident of iteration order. Nothing is ever
//! removed; cells in a chunk refer to blocks by type index for the lifetime of the process.

use std::collections::HashMap;

use log::debug;

use crate::error::{Result, VoxelError};

use super::{orientation::ORIENTATION_BITS, BlockDef, BlockTypeSize, MAX_TEXTURE_LAYER};

/// Largest number of blocks a cell can address: `type_index + 1` must fit above the
/// orientation bits of a `u16`.
pub const MAX_BLOCKS: usize = (u16::MAX >> ORIENTATION_BITS) as usize;

/// Append-only table of block definitions.
#[derive(Debug, Default, Clone)]
pub struct BlockRegistry {
    blocks: Vec<BlockDef>,
    by_name: HashMap<String, BlockTypeSize>,
}

impl BlockRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a block and assigns it the next sequential type index.
    ///
    /// # Arguments
    /// * `name` - Unique block name
    /// * `faces` - Texture layers in [right, left, top, bottom, front, back] order
    /// * `transparency` - 0 for opaque, higher for more transparent
    ///
    /// # Errors
    /// `DuplicateBlock` for a reused name, `TextureOutOfRange` for a layer the vertex
    /// format cannot carry, `RegistryFull` once every type index is taken.
    pub fn register(&mut self, name: &str, faces: [u16; 6], transparency: u8) -> Result<&BlockDef> {
        if self.by_name.contains_key(name) {
            return Err(VoxelError::DuplicateBlock(name.to_string()));
        }
        if let Some(&layer) = faces.iter().find(|layer| **layer > MAX_TEXTURE_LAYER) {
            return Err(VoxelError::TextureOutOfRange {
                block: name.to_string(),
                layer,
                max: MAX_TEXTURE_LAYER,
            });
        }
        if self.blocks.len() >= MAX_BLOCKS {
            return Err(VoxelError::RegistryFull(MAX_BLOCKS));
        }

        let type_index = self.blocks.len() as BlockTypeSize;
        debug!(
            "Registered block {} as type {} (transparency {})",
            name, type_index, transparency
        );
        self.by_name.insert(name.to_string(), type_index);
        self.blocks.push(BlockDef {
            name: name.to_string(),
            faces,
            transparency,
            type_index,
        });
        Ok(&self.blocks[type_index as usize])
    }

    /// Looks a block up by name.
    pub fn get(&self, name: &str) -> Result<&BlockDef> {
        self.by_name
            .get(name)
            .map(|index| &self.blocks[*index as usize])
            .ok_or_else(|| VoxelError::UnknownBlock(name.to_string()))
    }

    /// Looks a block up by type index.
    pub fn get_by_index(&self, type_index: BlockTypeSize) -> Result<&BlockDef> {
        self.blocks
            .get(type_index as usize)
            .ok_or_else(|| VoxelError::UnknownBlock(format!("#{}", type_index)))
    }

    /// Number of registered blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block is registered.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Definitions in type index order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockDef> {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_registration_order() {
        let mut registry = BlockRegistry::new();
        assert_eq!(registry.register("stone", [10; 6], 0).unwrap().type_index, 0);
        assert_eq!(registry.register("glass", [16; 6], 1).unwrap().type_index, 1);
        assert_eq!(registry.register("dirt", [13; 6], 0).unwrap().type_index, 2);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("glass").unwrap().transparency, 1);
        assert_eq!(registry.get_by_index(2).unwrap().name, "dirt");
        let names: Vec<&str> = registry.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["stone", "glass", "dirt"]);
    }

    #[test]
    fn test_unknown_lookups() {
        let registry = BlockRegistry::new();
        assert!(matches!(registry.get("stone"), Err(VoxelError::UnknownBlock(_))));
        assert!(matches!(registry.get_by_index(0), Err(VoxelError::UnknownBlock(_))));
    }

    #[test]
    fn test_rejects_duplicates_and_large_layers() {
        let mut registry = BlockRegistry::new();
        registry.register("stone", [10; 6], 0).unwrap();
        assert!(matches!(
            registry.register("stone", [10; 6], 0),
            Err(VoxelError::DuplicateBlock(_))
        ));
        assert!(matches!(
            registry.register("huge", [0, 0, 1024, 0, 0, 0], 0),
            Err(VoxelError::TextureOutOfRange { layer: 1024, .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_full() {
        let mut registry = BlockRegistry::new();
        for i in 0..MAX_BLOCKS {
            registry.register(&format!("block{}", i), [0; 6], 0).unwrap();
        }
        assert!(matches!(
            registry.register("one_more", [0; 6], 0),
            Err(VoxelError::RegistryFull(_))
        ));
    }
}
