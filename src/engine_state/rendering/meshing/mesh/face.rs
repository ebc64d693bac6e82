//! The per-slab face pass: which unit faces are visible and how they merge into quads.

use cgmath::Point3;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, registry::BlockRegistry},
    chunk::{Chunk, CHUNK_DIMENSION, CHUNK_PLANE_SIZE, CHUNK_SIZE},
};
use crate::error::{Result, VoxelError};

/// Everything the face pass needs to know about an occupied cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCell {
    /// Transparency of the block in this cell.
    pub transparency: u8,
    /// Texture layer showing on each world-space side, orientation already applied.
    pub textures: [u16; 6],
}

/// Decodes every occupied cell of `chunk` against `registry`.
///
/// # Errors
/// `CorruptCell` for a cell whose orientation bits are not one of the 24 rotations or
/// whose type index was never registered.
pub fn resolve_cells(chunk: &Chunk, registry: &BlockRegistry) -> Result<Vec<Option<ResolvedCell>>> {
    let mut resolved = vec![None; CHUNK_SIZE];
    for (position, cell) in chunk.blocks() {
        let corrupt = |reason| VoxelError::CorruptCell {
            raw: cell.raw(),
            x: position.x,
            y: position.y,
            z: position.z,
            reason,
        };
        let (type_index, orientation) = match cell.decode() {
            Ok(Some(parts)) => parts,
            Ok(None) | Err(_) => return Err(corrupt("invalid orientation bits")),
        };
        let block = registry
            .get_by_index(type_index)
            .map_err(|_| corrupt("unregistered block type"))?;

        let mut textures = [0; 6];
        for side in BlockSide::all() {
            textures[side as usize] = block.face_texture(side, orientation);
        }
        resolved[Chunk::index(position.x, position.y, position.z)] = Some(ResolvedCell {
            transparency: block.transparency,
            textures,
        });
    }
    Ok(resolved)
}

/// Maps slab-local coordinates to a chunk position.
///
/// `slab` runs along the side's axis; `a` and `b` are the two in-plane axes:
/// (y, z) for X sides, (z, x) for Y sides and (x, y) for Z sides.
#[inline]
pub fn to_chunk_position(side: BlockSide, slab: usize, a: usize, b: usize) -> Point3<usize> {
    match side.axis() {
        0 => Point3::new(slab, a, b),
        1 => Point3::new(b, slab, a),
        _ => Point3::new(a, b, slab),
    }
}

/// A merged rectangle of coplanar faces sharing one texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Quad {
    /// Direction the quad faces.
    pub side: BlockSide,
    /// Index of the slab along the side's axis.
    pub slab: usize,
    /// Origin along the first in-plane axis.
    pub a: usize,
    /// Origin along the second in-plane axis.
    pub b: usize,
    /// Extent along `a`.
    pub h: usize,
    /// Extent along `b`.
    pub d: usize,
    /// Texture layer shared by every covered face.
    pub layer: u16,
}

impl Quad {
    /// Number of unit faces the quad covers.
    pub fn area(&self) -> usize {
        self.h * self.d
    }

    /// Chunk positions of the cells whose faces this quad covers.
    pub fn cells(&self) -> impl Iterator<Item = Point3<usize>> + '_ {
        (self.b..self.b + self.d).flat_map(move |b| {
            (self.a..self.a + self.h).map(move |a| to_chunk_position(self.side, self.slab, a, b))
        })
    }
}

/// The 16x16 candidate grid for one slab of one side.
///
/// An entry is 0 when no face is drawn, otherwise the texture layer plus one so that
/// layer 0 stays distinguishable from "no face". Indexed as `a | b << 4`.
pub struct FacePlane {
    candidates: [u16; CHUNK_PLANE_SIZE],
}

impl FacePlane {
    /// An empty plane.
    pub fn new() -> Self {
        FacePlane {
            candidates: [0; CHUNK_PLANE_SIZE],
        }
    }

    /// Computes which faces of `slab` are visible from `side`.
    ///
    /// A face is drawn when the cell's transparency is strictly lower than its
    /// neighbor's. An empty or out-of-chunk neighbor counts as infinitely transparent.
    pub fn fill(&mut self, resolved: &[Option<ResolvedCell>], side: BlockSide, slab: usize) {
        let normal = side.normal();
        for b in 0..CHUNK_DIMENSION {
            for a in 0..CHUNK_DIMENSION {
                let i = a | b << 4;
                let position = to_chunk_position(side, slab, a, b);
                let Some(cell) = resolved[Chunk::index(position.x, position.y, position.z)] else {
                    self.candidates[i] = 0;
                    continue;
                };

                let (nx, ny, nz) = (
                    position.x as i32 + normal.x,
                    position.y as i32 + normal.y,
                    position.z as i32 + normal.z,
                );
                let neighbor_transparency = if Chunk::in_bounds(nx, ny, nz) {
                    resolved[Chunk::index(nx as usize, ny as usize, nz as usize)]
                        .map(|neighbor| neighbor.transparency)
                } else {
                    None
                };
                let visible = match neighbor_transparency {
                    Some(transparency) => cell.transparency < transparency,
                    None => true,
                };

                self.candidates[i] = if visible {
                    cell.textures[side as usize] + 1
                } else {
                    0
                };
            }
        }
    }

    /// Greedily merges the candidates into maximal rectangles, consuming them.
    ///
    /// Scans `b` outer and `a` inner. Each rectangle first grows along `a` while the
    /// candidate stays equal, then along `b` while the whole run still matches.
    pub fn extract(&mut self, side: BlockSide, slab: usize, mut emit: impl FnMut(Quad)) {
        for b in 0..CHUNK_DIMENSION {
            for a in 0..CHUNK_DIMENSION {
                let i = a | b << 4;
                let face = self.candidates[i];
                if face == 0 {
                    continue;
                }

                let mut h = 0;
                while a + h < CHUNK_DIMENSION && self.candidates[i + h] == face {
                    h += 1;
                }

                let mut d = 0;
                while b + d < CHUNK_DIMENSION {
                    let row = i + (d << 4);
                    if self.candidates[row..row + h].iter().any(|c| *c != face) {
                        break;
                    }
                    self.candidates[row..row + h].fill(0);
                    d += 1;
                }

                emit(Quad {
                    side,
                    slab,
                    a,
                    b,
                    h,
                    d,
                    layer: face - 1,
                });
            }
        }
    }
}

impl Default for FacePlane {
    fn default() -> Self {
        Self::new()
    }
}
