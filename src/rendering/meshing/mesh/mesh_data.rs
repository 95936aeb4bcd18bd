//! Geometry patches produced for a single cube face.
//!
//! A `MeshData` is the cached, atlas-independent form of a face: positions in a
//! unit cube centred on the origin, per-vertex normals, texture coordinates in
//! `[0, 1]` and a triangle list. Generators build one through a `MeshBuilder`
//! per call and either return it or report that the face has nothing to draw.

use cgmath::{Vector2, Vector3};

/// Triangulated geometry for one cube face.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions
    pub vertices: Vec<Vector3<f32>>,
    /// Per-vertex normals, parallel to `vertices`
    pub normals: Vec<Vector3<f32>>,
    /// Per-vertex texture coordinates, parallel to `vertices`
    pub texture_coords: Vec<Vector2<f32>>,
    /// Triangle list; every three entries form one triangle
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles in the patch.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The three corner positions of each triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [Vector3<f32>; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ]
        })
    }
}

/// Accumulates vertices and triangles for one generator call.
#[derive(Default)]
pub struct MeshBuilder {
    mesh: MeshData,
}

impl MeshBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices pushed so far.
    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertices.len() as u32
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(
        &mut self,
        position: Vector3<f32>,
        normal: Vector3<f32>,
        texture_coord: Vector2<f32>,
    ) -> u32 {
        self.mesh.vertices.push(position);
        self.mesh.normals.push(normal);
        self.mesh.texture_coords.push(texture_coord);
        self.vertex_count() - 1
    }

    /// Appends a triangle over already pushed vertices.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.mesh.indices.extend_from_slice(&[a, b, c]);
    }

    /// Appends three new vertices sharing one normal and the triangle over them.
    pub fn push_flat_triangle(
        &mut self,
        corners: [(Vector3<f32>, Vector2<f32>); 3],
        normal: Vector3<f32>,
    ) {
        let [a, b, c] = corners.map(|(position, uv)| self.push_vertex(position, normal, uv));
        self.push_triangle(a, b, c);
    }

    /// The finished patch, or `None` if no triangle was emitted.
    pub fn finish(self) -> Option<MeshData> {
        if self.mesh.indices.is_empty() {
            None
        } else {
            Some(self.mesh)
        }
    }
}
