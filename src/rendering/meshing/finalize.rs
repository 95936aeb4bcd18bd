//! Turning cached geometry into renderer-ready buffers.
//!
//! Cached patches keep local texture coordinates so that one patch serves every
//! texture. Finalizing copies a patch into a [`RenderBuffer`] with its texture
//! coordinates moved into an atlas rectangle; the cached patch is never touched.

use cgmath::Vector3;

use crate::rendering::{vertex::RenderVertex, AtlasRect};

use super::mesh::MeshData;

/// Interleaved vertices and a triangle list, ready for upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderBuffer {
    /// Interleaved vertex data
    pub vertices: Vec<RenderVertex>,
    /// Triangle list into `vertices`
    pub indices: Vec<u32>,
}

impl RenderBuffer {
    /// Number of triangles in the buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the buffer holds no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The vertex data as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index data as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Appends another buffer, scaling then offsetting its positions.
    ///
    /// # Arguments
    /// * `other` - The buffer to copy from
    /// * `scale` - Uniform scale applied to positions
    /// * `offset` - Translation applied after scaling
    pub fn append(&mut self, other: &RenderBuffer, scale: f32, offset: Vector3<f32>) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices.iter().map(|v| {
            let [x, y, z] = v.position;
            RenderVertex::new(
                [x * scale + offset.x, y * scale + offset.y, z * scale + offset.z],
                v.normal,
                v.tex_coords,
            )
        }));
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// Copies a patch into a render buffer, mapping texture coordinates into `atlas`.
///
/// # Arguments
/// * `mesh` - The cached patch, if the face had one
/// * `atlas` - Where the face's texture sits, if it has been looked up
///
/// # Returns
/// `None` if either the patch or the atlas rectangle is missing, otherwise a
/// buffer with the same positions, normals and indices
pub fn finalize(mesh: Option<&MeshData>, atlas: Option<&AtlasRect>) -> Option<RenderBuffer> {
    let mesh = mesh?;
    let atlas = atlas?;

    let vertices = mesh
        .vertices
        .iter()
        .zip(&mesh.normals)
        .zip(&mesh.texture_coords)
        .map(|((position, normal), uv)| {
            RenderVertex::new((*position).into(), (*normal).into(), atlas.map(*uv))
        })
        .collect();

    Some(RenderBuffer {
        vertices,
        indices: mesh.indices.clone(),
    })
}
