//! # Core Module
//!
//! Concurrency primitives shared by the map, the mesh cache and the task system.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted value with read-write locking
//!
//! ## Usage
//! ```rust
//! use terrain_mesh::core::MtResource;
//!
//! let counter = MtResource::new(0);
//! *counter.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod mt_resource;

pub use mt_resource::MtResource;
