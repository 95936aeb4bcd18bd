//! Tile mesh caching and finalization.
//!
//! Terrain is built from a small vocabulary of face shapes: the same slope or
//! wall appears thousands of times across a map. This module generates each
//! distinct face once and hands out the shared result.
//!
//! # Architecture
//! - `TileMeshCache`: Thread-safe memo from `FaceShape` to its geometry
//! - `mesh/`: The pure face generators the cache calls on a miss
//! - `finalize`: Copies a cached patch into a `RenderBuffer` with atlas coordinates
//!
//! # Concurrency
//! The cache is split into shards, each behind its own read-write lock, so
//! workers meshing different cells rarely contend. A miss generates geometry
//! outside any lock; if two workers race on the same key, both compute the same
//! patch and the first one stored wins. Absent geometry is cached too, so a face
//! with nothing to draw is only examined once.

use std::{
    collections::{hash_map::RandomState, HashMap},
    hash::BuildHasher,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use log::trace;

mod finalize;
mod mesh;

pub use finalize::{finalize, RenderBuffer};
pub use mesh::*;

use crate::{core::MtResource, map::face_shape::FaceShape};

use super::AtlasRect;

/// Number of independently locked partitions in a `TileMeshCache`.
pub const CACHE_SHARDS: usize = 16;

type Shard = MtResource<HashMap<FaceShape, Option<Arc<MeshData>>>>;

/// Counters describing how a cache has been used.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: usize,
    /// Lookups that had to run a generator
    pub misses: usize,
    /// Misses whose generator produced geometry
    pub generated: usize,
}

/// Thread-safe memo of face geometry keyed by `FaceShape`.
///
/// Entries are never evicted or replaced; the number of distinct face shapes is
/// bounded by the corner height vocabulary.
pub struct TileMeshCache {
    shards: Vec<Shard>,
    hasher: RandomState,
    hits: AtomicUsize,
    misses: AtomicUsize,
    generated: AtomicUsize,
}

impl TileMeshCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        TileMeshCache {
            shards: (0..CACHE_SHARDS)
                .map(|_| MtResource::new(HashMap::new()))
                .collect(),
            hasher: RandomState::new(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            generated: AtomicUsize::new(0),
        }
    }

    /// Returns the geometry for a face, generating it on first request.
    ///
    /// # Arguments
    /// * `shape` - The face to look up
    ///
    /// # Returns
    /// The shared patch, or `None` if the face has nothing to draw. Every call
    /// with an equal key returns the same answer.
    pub fn get(&self, shape: &FaceShape) -> Option<Arc<MeshData>> {
        let shard = self.shard(shape);

        if let Some(entry) = shard.get().get(shape) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return entry.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let patch = mesh::generate(shape).map(Arc::new);
        trace!(
            "Generated {:?} face: {} triangles",
            shape.direction(),
            patch.as_ref().map_or(0, |p| p.triangle_count())
        );

        let mut entries = shard.get_mut();
        let entry = entries.entry(*shape).or_insert_with(|| {
            if patch.is_some() {
                self.generated.fetch_add(1, Ordering::Relaxed);
            }
            patch
        });
        entry.clone()
    }

    /// Returns the geometry for a face finalized into an atlas rectangle.
    ///
    /// # Arguments
    /// * `shape` - The face to look up
    /// * `atlas` - Where the face's texture sits
    ///
    /// # Returns
    /// `None` if the face has nothing to draw or no atlas rectangle is given
    pub fn get_mesh(&self, shape: &FaceShape, atlas: Option<&AtlasRect>) -> Option<RenderBuffer> {
        finalize(self.get(shape).as_deref(), atlas)
    }

    /// Number of cached keys, including faces with no geometry.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.get().len()).sum()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A snapshot of the usage counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            generated: self.generated.load(Ordering::Relaxed),
        }
    }

    fn shard(&self, shape: &FaceShape) -> &Shard {
        let hash = self.hasher.hash_one(shape) as usize;
        &self.shards[hash % CACHE_SHARDS]
    }
}

impl Default for TileMeshCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{cube_shape::CubeShape, direction::Direction};

    #[test]
    fn repeated_lookups_hit_the_cache() {
        let cache = TileMeshCache::new();
        let face = FaceShape::new(
            CubeShape::new(5, 5, 5, 0, true).unwrap(),
            CubeShape::SKY,
            Direction::None,
        );

        let first = cache.get(&face).unwrap();
        let second = cache.get(&face).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                generated: 1
            }
        );
    }

    #[test]
    fn absent_geometry_is_cached() {
        let cache = TileMeshCache::new();
        let face = FaceShape::new(CubeShape::SOLID, CubeShape::SKY, Direction::Up);

        assert!(cache.get(&face).is_none());
        assert!(cache.get(&face).is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().generated, 0);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn solid_cube_has_no_slope_patch() {
        let cache = TileMeshCache::new();
        for split in [true, false] {
            let solid = CubeShape::new(9, 9, 9, 9, split).unwrap();
            let face = FaceShape::new(solid, CubeShape::SKY, Direction::None);
            assert!(cache.get(&face).is_none());
        }
        assert_eq!(cache.stats().generated, 0);
    }

    #[test]
    fn dispatches_on_direction() {
        let cache = TileMeshCache::new();
        let cube = CubeShape::new(1, 1, 1, 5, true).unwrap();

        // NW-SW-SE half is not level, SE-NE-NW half is on the floor
        let up = cache.get(&FaceShape::new(cube, CubeShape::SKY, Direction::Up));
        assert_eq!(up.unwrap().triangle_count(), 1);

        let wall = cache.get(&FaceShape::new(cube, CubeShape::SKY, Direction::South));
        assert!(wall.unwrap().normals.iter().all(|n| n.y == -1.0));

        let sloped = CubeShape::new(3, 4, 5, 6, false).unwrap();
        let up = cache.get(&FaceShape::new(sloped, CubeShape::SKY, Direction::Down));
        assert!(up.is_none());
    }

    #[test]
    fn get_mesh_finalizes_into_atlas() {
        let cache = TileMeshCache::new();
        let face = FaceShape::new(CubeShape::flat(4).unwrap(), CubeShape::SKY, Direction::None);
        let atlas = AtlasRect::new(0.5, 1.0, 0.5, 1.0);

        let buffer = cache.get_mesh(&face, Some(&atlas)).unwrap();
        assert!(buffer
            .vertices
            .iter()
            .all(|v| v.tex_coords[0] >= 0.5 && v.tex_coords[1] >= 0.5));
        assert_eq!(cache.get(&face).unwrap().indices, buffer.indices);

        // no atlas rectangle, no buffer, but the patch is still cached
        assert_eq!(cache.get_mesh(&face, None), None);
        assert!(cache.get(&face).is_some());
    }
}
