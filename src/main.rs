//! # Terrain Mesh Entry Point
//!
//! Calls into the library's `run()` function and turns an error into a
//! non-zero exit code.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- terrain-mesh.json
//! ```

fn main() {
    if let Err(err) = terrain_mesh::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
