//! Geometry for terrain faces, from cached tile patches to merged cell meshes.
//!
//! The pipeline is:
//! 1. `TileMeshCache::get` returns the shared patch for a `FaceShape`
//! 2. `finalize` copies the patch into a `RenderBuffer`, mapping its texture
//!    coordinates into an `AtlasRect`
//! 3. `CellMesh::build` merges the buffers of every visible face in a cell
//! 4. `CellMeshTask` runs step 3 on a worker and hands the result to a `CellMeshStore`

mod atlas;
mod cell_mesh;
pub mod meshing;
pub mod tasks;
mod vertex;

pub use atlas::AtlasRect;
pub use cell_mesh::{CellMesh, CellMeshStore};
pub use meshing::{finalize, CacheStats, MeshData, RenderBuffer, TileMeshCache};
pub use vertex::RenderVertex;
