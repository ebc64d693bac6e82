//! # Error Module
//!
//! Every failure the chunk core can report. All of these are programming-error class
//! failures (bad configuration, corrupted grid, a driver bug); nothing in here is
//! retried or swallowed. The surrounding renderer decides what the user sees.

use thiserror::Error;

/// Errors produced by the block registry, the chunk grid, the mesher and the scene config.
#[derive(Debug, Error)]
pub enum VoxelError {
    /// A lookup referenced a block name or type index that was never registered.
    #[error("unknown block `{0}`")]
    UnknownBlock(String),

    /// A coordinate or region does not fit inside the chunk.
    #[error("region origin ({x}, {y}, {z}) size {w}x{h}x{d} exceeds the {dimension}^3 chunk")]
    OutOfBounds {
        /// Requested origin, x.
        x: i32,
        /// Requested origin, y.
        y: i32,
        /// Requested origin, z.
        z: i32,
        /// Requested width.
        w: i32,
        /// Requested height.
        h: i32,
        /// Requested depth.
        d: i32,
        /// Edge length of the grid.
        dimension: usize,
    },

    /// The drift driver tried to move a block onto a cell that already holds one.
    #[error("destination cell ({x}, {y}, {z}) is already occupied")]
    Occupied {
        /// Destination x.
        x: usize,
        /// Destination y.
        y: usize,
        /// Destination z.
        z: usize,
    },

    /// A cell holds a type index or orientation that cannot be decoded.
    #[error("corrupt cell {raw:#06x} at ({x}, {y}, {z}): {reason}")]
    CorruptCell {
        /// The stored cell value.
        raw: u16,
        /// Cell x.
        x: usize,
        /// Cell y.
        y: usize,
        /// Cell z.
        z: usize,
        /// Which part of the value failed to decode.
        reason: &'static str,
    },

    /// The same block name was registered twice.
    #[error("block `{0}` is already registered")]
    DuplicateBlock(String),

    /// A face texture layer does not fit into the packed vertex layer field.
    #[error("texture layer {layer} of block `{block}` exceeds the maximum of {max}")]
    TextureOutOfRange {
        /// Name of the offending block.
        block: String,
        /// The layer it asked for.
        layer: u16,
        /// Largest layer the vertex format can carry.
        max: u16,
    },

    /// No more type indices fit into the cell encoding.
    #[error("block registry is full ({0} blocks)")]
    RegistryFull(usize),

    /// An orientation index or top/front pair that is not one of the 24 rotations.
    #[error("invalid orientation: {0}")]
    InvalidOrientation(String),

    /// A host clock reading that is not a finite, representable time.
    #[error("invalid clock reading: {0} ms")]
    InvalidTimestamp(f64),

    /// A texture name that is not part of the atlas table.
    #[error("unknown texture `{0}`")]
    UnknownTexture(String),

    /// The scene file is not valid scene JSON.
    #[error("malformed scene config: {0}")]
    Config(#[from] serde_json::Error),

    /// The scene file could not be read.
    #[error("failed to read scene config: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VoxelError>;
