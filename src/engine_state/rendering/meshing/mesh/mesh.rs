//! Mesh data structures for chunk rendering.
//!
//! This module turns merged quads into the flat vertex buffer the renderer uploads:
//! six vertices (two triangles) per quad, four floats per vertex.

use crate::engine_state::rendering::vertex::{PackedMeta, Vertex, VERTEX_COMPONENTS};
use crate::engine_state::voxels::block::block_side::BlockSide;

use super::face::{to_chunk_position, Quad};

/// Vertices emitted per quad.
pub const VERTICES_PER_QUAD: usize = 6;

/// One corner of a quad's triangle pair: whether it sits at the far end of the `a` and
/// `b` extents, and whether its texture coordinate takes the full U and V extent.
type Corner = (bool, bool, bool, bool);

const F: bool = false;
const T: bool = true;

/// Corner tables per side, in `BlockSide` order. The winding is counter-clockwise when
/// viewed from outside the face.
const CORNERS: [[Corner; VERTICES_PER_QUAD]; 6] = [
    // RIGHT
    [(F, F, T, T), (T, F, T, F), (F, T, F, T), (F, T, F, T), (T, F, T, F), (T, T, F, F)],
    // LEFT
    [(F, F, F, T), (F, T, T, T), (T, F, F, F), (T, F, F, F), (F, T, T, T), (T, T, T, F)],
    // TOP
    [(F, F, F, F), (T, F, F, T), (F, T, T, F), (F, T, T, F), (T, F, F, T), (T, T, T, T)],
    // BOTTOM
    [(F, F, T, F), (F, T, F, F), (T, F, T, T), (T, F, T, T), (F, T, F, F), (T, T, F, T)],
    // FRONT
    [(F, F, F, T), (T, F, T, T), (F, T, F, F), (F, T, F, F), (T, F, T, T), (T, T, T, F)],
    // BACK
    [(F, F, T, T), (F, T, T, F), (T, F, F, T), (T, F, F, T), (F, T, T, F), (T, T, F, F)],
];

/// The mesh of a chunk: a flat vertex buffer plus bookkeeping about the quads in it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    quads: Vec<Quad>,
    quads_per_side: [usize; 6],
}

impl Mesh {
    /// An empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the six vertices of `quad`.
    pub fn add_quad(&mut self, quad: Quad) {
        self.vertices.extend(Self::generate_face_vertices(&quad));
        self.quads_per_side[quad.side as usize] += 1;
        self.quads.push(quad);
    }

    /// Generates the two triangles of a quad.
    ///
    /// Texture coordinates span the whole rectangle (U by V texels of a repeating
    /// texture), not a single block, so textures tile across merged faces.
    pub fn generate_face_vertices(quad: &Quad) -> [Vertex; VERTICES_PER_QUAD] {
        let plane = if quad.side.is_negative() {
            quad.slab
        } else {
            quad.slab + 1
        };
        // Z faces run U along `a`; X and Y faces run U along `b`.
        let (u_extent, v_extent) = match quad.side {
            BlockSide::FRONT | BlockSide::BACK => (quad.h, quad.d),
            _ => (quad.d, quad.h),
        };

        CORNERS[quad.side as usize].map(|(far_a, far_b, full_u, full_v)| {
            let a = quad.a + if far_a { quad.h } else { 0 };
            let b = quad.b + if far_b { quad.d } else { 0 };
            let position = to_chunk_position(quad.side, plane, a, b);
            let meta = PackedMeta::new(
                quad.side,
                if full_u { u_extent as u8 } else { 0 },
                if full_v { v_extent as u8 } else { 0 },
                quad.layer,
            );
            Vertex::new(position.x, position.y, position.z, meta)
        })
    }

    /// Emitted vertices, six per quad.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The buffer as uploaded to the GPU: `x, y, z, meta` per vertex.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw bytes of the buffer, for byte-for-byte comparisons and uploads.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Merged quads in emission order.
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Number of merged quads.
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Number of vertices, six per quad.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of floats in the flat buffer, always a multiple of 24.
    pub fn float_len(&self) -> usize {
        self.vertices.len() * VERTEX_COMPONENTS
    }

    /// Number of quads facing `side`.
    pub fn quads_on(&self, side: BlockSide) -> usize {
        self.quads_per_side[side as usize]
    }

    /// Whether no face is visible.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
