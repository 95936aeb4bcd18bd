use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A shared, lock-protected value that can be handed to worker threads.
///
/// `MtResource` wraps an `Arc<RwLock<T>>`. Cloning it clones the handle, not the
/// value, so a cell filled on one worker is visible to the worker that meshes it,
/// and every shard of the tile mesh cache is one `MtResource` around a map.
///
/// # Type Parameters
/// - `T`: The shared value, must be `Send + Sync`
///
/// # Examples
///
/// ```
/// use std::thread;
/// use cgmath::Point3;
/// use terrain_mesh::{core::MtResource, map::{cell::Cell, cube_shape::CubeShape}};
///
/// let cell = MtResource::new(Cell::new(Point3::new(0, 0, 0)));
/// let writer = cell.clone();
///
/// thread::spawn(move || {
///     writer.get_mut().set_shape(1, 2, 3, CubeShape::SOLID);
/// })
/// .join()
/// .unwrap();
///
/// assert!(cell.get().shape(1, 2, 3).is_solid());
/// ```
///
/// # Locking
/// - Any number of `get()` guards may be held at once
/// - `get_mut()` waits for every other guard to be released
/// - Do not hold a guard from `get()` while calling `get_mut()` on the same
///   resource from the same thread; it deadlocks
pub struct MtResource<T: Send + Sync> {
    /// The shared value
    pub resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync + 'static> MtResource<T> {
    /// Wraps a value for sharing.
    ///
    /// # Arguments
    /// * `resource` - The value to share
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a guard for reading the value.
    ///
    /// # Panics
    /// Panics if a thread panicked while holding the write guard.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap()
    }

    /// Returns a guard for modifying the value.
    ///
    /// # Panics
    /// Panics if a thread panicked while holding the write guard.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap()
    }

    /// Number of handles sharing this value.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.resource)
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_value() {
        let counter = MtResource::new(0u32);
        let other = counter.clone();
        *other.get_mut() += 5;

        assert_eq!(*counter.get(), 5);
        assert_eq!(counter.handle_count(), 2);
        drop(other);
        assert_eq!(counter.handle_count(), 1);
    }
}
