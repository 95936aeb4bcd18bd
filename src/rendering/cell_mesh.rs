//! Meshes of whole cells.
//!
//! A `CellMesh` merges the finalized geometry of every visible face in a cell
//! into one buffer in world space. The `CellMeshStore` keeps the latest mesh of
//! each cell for whoever draws or exports them.

use std::collections::HashMap;

use cgmath::{Point3, Vector3};
use log::debug;

use crate::{
    error::TerrainError,
    map::{cell::Cell, CELL_EDGE_SIZE},
};

use super::{meshing::RenderBuffer, AtlasRect, TileMeshCache};

/// The merged geometry of one cell at one detail level.
#[derive(Clone, Debug, PartialEq)]
pub struct CellMesh {
    /// Cell coordinate the mesh was built from
    pub coordinate: Point3<i32>,
    /// Detail level the cell was walked at
    pub detail_level: u8,
    /// Faces that contributed geometry
    pub face_count: usize,
    /// World-space vertices and triangles
    pub buffer: RenderBuffer,
}

impl CellMesh {
    /// A mesh with no geometry.
    pub fn empty(coordinate: Point3<i32>, detail_level: u8) -> Self {
        CellMesh {
            coordinate,
            detail_level,
            face_count: 0,
            buffer: RenderBuffer::default(),
        }
    }

    /// Builds the mesh of a cell from the shared tile cache.
    ///
    /// Each face's patch is finalized into `atlas`, scaled to the cube size of
    /// the detail level and moved to the cube's centre in world space.
    ///
    /// # Errors
    /// Returns `TerrainError::InvalidDetailLevel` if the level is out of range.
    pub fn build(
        cell: &Cell,
        cache: &TileMeshCache,
        detail_level: u8,
        atlas: &AtlasRect,
    ) -> Result<Self, TerrainError> {
        let faces = cell.faces(detail_level)?;
        let scale = (1 << detail_level) as f32;
        let edge = CELL_EDGE_SIZE as f32;
        let origin = Vector3::new(
            cell.coordinate.x as f32 * edge,
            cell.coordinate.y as f32 * edge,
            cell.coordinate.z as f32 * edge,
        );

        let mut mesh = CellMesh::empty(cell.coordinate, detail_level);

        for face in &faces {
            let Some(patch) = cache.get_mesh(&face.shape, Some(atlas)) else {
                continue;
            };

            let cube = face.index.to_point();
            let centre = Vector3::new(
                origin.x + (cube.x as f32 + 0.5) * scale,
                origin.y + (cube.y as f32 + 0.5) * scale,
                origin.z + (cube.z as f32 + 0.5) * scale,
            );
            mesh.buffer.append(&patch, scale, centre);
            mesh.face_count += 1;
        }

        debug!(
            "Meshed cell {:?} at level {}: {} of {} faces, {} triangles",
            cell.coordinate,
            detail_level,
            mesh.face_count,
            faces.len(),
            mesh.buffer.triangle_count()
        );

        Ok(mesh)
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.buffer.triangle_count()
    }
}

/// The latest mesh of each cell, by cell coordinate.
#[derive(Default)]
pub struct CellMeshStore {
    meshes: HashMap<Point3<i32>, CellMesh>,
}

impl CellMeshStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a mesh, returning the one it replaces.
    pub fn insert(&mut self, mesh: CellMesh) -> Option<CellMesh> {
        self.meshes.insert(mesh.coordinate, mesh)
    }

    /// The mesh of the cell at `coordinate`, if it has been built.
    pub fn get(&self, coordinate: Point3<i32>) -> Option<&CellMesh> {
        self.meshes.get(&coordinate)
    }

    /// Number of stored meshes.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether no mesh has been stored.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Iterates over the stored meshes in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CellMesh> {
        self.meshes.values()
    }

    /// Total triangles over all stored meshes.
    pub fn triangle_count(&self) -> usize {
        self.meshes.values().map(CellMesh::triangle_count).sum()
    }
}
