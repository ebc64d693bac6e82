//! Vertex data structures for chunk rendering.
//!
//! This module defines the vertex format consumed by the renderer: four floats per
//! vertex, the first three the position and the fourth a bit-packed metadata word that
//! the vertex shader unpacks into texture coordinates, texture layer and face normal.

use crate::engine_state::voxels::block::block_side::BlockSide;

const LAYER_BITS: u32 = 10;
const COORD_BITS: u32 = 5;
const V_SHIFT: u32 = LAYER_BITS;
const U_SHIFT: u32 = V_SHIFT + COORD_BITS;
const SIDE_SHIFT: u32 = U_SHIFT + COORD_BITS;
const LAYER_MASK: u32 = (1 << LAYER_BITS) - 1;
const COORD_MASK: u32 = (1 << COORD_BITS) - 1;
const SIDE_MASK: u32 = 0b111;

/// Number of floats per vertex in the flat buffer.
pub const VERTEX_COMPONENTS: usize = 4;

/// Decoded form of a vertex's metadata word.
///
/// # Bit Layout (MSB → LSB)
/// - bits 20..=22: face/normal index (`BlockSide` discriminant)
/// - bits 15..=19: texture U coordinate (0..=16)
/// - bits 10..=14: texture V coordinate (0..=16)
/// - bits 0..=9: texture layer (0..=1023)
///
/// The highest set bit is bit 22, so the packed value is exact as an `f32`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PackedMeta {
    /// Face direction.
    pub side: BlockSide,
    /// Texture U extent, 0..=16.
    pub u: u8,
    /// Texture V extent, 0..=16.
    pub v: u8,
    /// Texture array layer.
    pub layer: u16,
}

impl PackedMeta {
    /// Creates metadata; `u` and `v` must not exceed 31.
    pub fn new(side: BlockSide, u: u8, v: u8, layer: u16) -> Self {
        debug_assert!(u as u32 <= COORD_MASK && v as u32 <= COORD_MASK);
        debug_assert!(layer as u32 <= LAYER_MASK);
        PackedMeta { side, u, v, layer }
    }

    /// Packs the fields into the GPU-facing integer.
    pub fn pack(self) -> u32 {
        (self.side as u32) << SIDE_SHIFT
            | (self.u as u32 & COORD_MASK) << U_SHIFT
            | (self.v as u32 & COORD_MASK) << V_SHIFT
            | (self.layer as u32 & LAYER_MASK)
    }

    /// Unpacks a metadata word. Returns `None` if the face index is not a valid side.
    pub fn unpack(packed: u32) -> Option<Self> {
        let side = BlockSide::from_index(((packed >> SIDE_SHIFT) & SIDE_MASK) as u8)?;
        Some(PackedMeta {
            side,
            u: ((packed >> U_SHIFT) & COORD_MASK) as u8,
            v: ((packed >> V_SHIFT) & COORD_MASK) as u8,
            layer: (packed & LAYER_MASK) as u16,
        })
    }
}

/// A vertex in the chunk mesh.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Packed metadata: f32 holding an integer (4 bytes)
///
/// Total size: 16 bytes, uploaded as a single `vec4` attribute.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk space
    pub position: [f32; 3],
    /// `PackedMeta::pack` stored as a float
    pub meta: f32,
}

impl Vertex {
    /// A vertex at integer grid coordinates.
    pub fn new(x: usize, y: usize, z: usize, meta: PackedMeta) -> Self {
        Vertex {
            position: [x as f32, y as f32, z as f32],
            meta: meta.pack() as f32,
        }
    }

    /// Decodes the metadata word back into its fields.
    pub fn meta(&self) -> Option<PackedMeta> {
        PackedMeta::unpack(self.meta as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_matches_shader_layout() {
        let meta = PackedMeta::new(BlockSide::FRONT, 3, 16, 31);
        assert_eq!(meta.pack(), 4 << 20 | 3 << 15 | 16 << 10 | 31);
    }

    #[test]
    fn test_pack_unpack_extremes() {
        for side in BlockSide::all() {
            for (u, v, layer) in [(0, 0, 0), (16, 16, 1023), (7, 12, 512)] {
                let meta = PackedMeta::new(side, u, v, layer);
                assert_eq!(PackedMeta::unpack(meta.pack()), Some(meta));
            }
        }
    }

    #[test]
    fn test_unpack_rejects_bad_side() {
        assert_eq!(PackedMeta::unpack(6 << 20), None);
        assert_eq!(PackedMeta::unpack(7 << 20), None);
    }

    #[test]
    fn test_vertex_is_four_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), VERTEX_COMPONENTS * 4);
        let vertex = Vertex::new(16, 0, 3, PackedMeta::new(BlockSide::BACK, 16, 16, 1023));
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        assert_eq!(&floats[..3], &[16.0, 0.0, 3.0]);
        assert_eq!(vertex.meta().unwrap().side, BlockSide::BACK);
        assert_eq!(vertex.meta().unwrap().layer, 1023);
    }
}
