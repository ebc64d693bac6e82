//! # Voxel Core
//!
//! This module contains the data side of the engine: what a block is, how a chunk stores
//! blocks, and how the chunk changes over time.
//!
//! ## Architecture
//!
//! * **Block**: Block sides, orientations, the texture table and the block registry
//! * **Chunk**: The fixed 16x16x16 grid of encoded cells
//! * **Drift**: The timer-driven driver that relocates one block per tick
//!
//! ## Data Flow
//!
//! 1. Blocks are registered and receive type indices
//! 2. Regions of the chunk are filled with registered blocks
//! 3. The drift driver moves single cells around
//! 4. Every change is followed by a full remesh in `rendering::meshing`

pub mod block;
pub mod chunk;
pub mod drift;
