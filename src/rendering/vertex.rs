//! Vertex data structures for finalized terrain buffers.
//!
//! This module defines the interleaved vertex format handed to the renderer once
//! a tile mesh has had its texture coordinates mapped into the atlas.

/// A vertex in a finalized terrain buffer.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Normal: 3x f32 (12 bytes)
/// - Texture Coordinates: 2x f32 (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderVertex {
    /// Position in cube or world space, depending on the buffer
    pub position: [f32; 3],
    /// Surface normal; not always unit length for skirt and bisector faces
    pub normal: [f32; 3],
    /// Atlas texture coordinates
    pub tex_coords: [f32; 2],
}

impl RenderVertex {
    /// Byte distance between consecutive vertices.
    pub const STRIDE: usize = std::mem::size_of::<RenderVertex>();

    /// Byte offset of the texture coordinate attribute.
    pub const TEX_COORDS_OFFSET: usize = std::mem::size_of::<[f32; 6]>();

    /// Creates a new vertex.
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        RenderVertex {
            position,
            normal,
            tex_coords,
        }
    }
}
