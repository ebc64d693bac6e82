//! # Voxel Chunk Demo Entry Point
//!
//! Builds the demo scene (or the scene in the JSON file given as the first argument),
//! logs its mesh statistics and lets it drift for a few ticks.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- scene.json
//! ```

fn main() {
    #[cfg(not(target_family = "wasm"))]
    {
        if let Err(error) = voxel_chunk::run() {
            log::error!("{}", error);
            std::process::exit(1);
        }
    }
}
