#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Chunk
//!
//! The meshing core of a small voxel scene: a 16x16x16 chunk of oriented blocks turned
//! into a compact, greedily merged vertex buffer that a GPU can draw directly.
//!
//! ## Key Modules
//!
//! * `core` - The shared resource container used for threaded hosts
//! * `config` - JSON scene descriptions and the built-in demo scene
//! * `engine_state` - The scene: block registry, chunk grid, meshing and the drift driver
//! * `error` - The error type shared by every fallible operation
//!
//! ## Usage
//!
//! ```rust
//! use voxel_chunk::{config::SceneConfig, engine_state::ChunkScene};
//!
//! let mut scene = ChunkScene::from_config(&SceneConfig::default()).unwrap();
//! let floats = scene.mesh().as_floats().len();
//! assert_eq!(floats % 24, 0);
//!
//! // Move one block and rebuild the mesh.
//! scene.tick().unwrap();
//! ```
//!
//! In the browser the same scene is driven through `web::WebChunk`.

use cfg_if::cfg_if;

pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;
#[cfg(target_family = "wasm")]
pub mod web;

pub use engine_state::rendering::meshing::mesh::greedy as generate_mesh;

/// Number of drift ticks the native demo runs before exiting.
#[cfg(not(target_family = "wasm"))]
const DEMO_TICKS: u32 = 10;

cfg_if! {
    if #[cfg(target_family = "wasm")] {
        fn install_logger() {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            let _ = console_log::init_with_level(log::Level::Info);
        }
    } else {
        fn install_logger() {
            let _ = env_logger::Builder::new()
                .target(env_logger::Target::Stdout)
                .parse_env("RUST_LOG")
                .try_init();
        }
    }
}

/// Installs the platform logger. Calling it again is a no-op.
///
/// Native builds log to stdout through `env_logger`, filtered by `RUST_LOG`. Browser
/// builds log to the developer console and route panics there too.
pub fn init_logging() {
    install_logger();
}

/// Runs the native demo: builds a scene from the JSON file named by the first argument,
/// or the default scene, then lets it drift for a few ticks.
#[cfg(not(target_family = "wasm"))]
pub fn run() -> error::Result<()> {
    use log::info;
    use web_time::Instant;

    use crate::config::SceneConfig;
    use crate::engine_state::{rendering::Mesh, voxels::block::block_side::BlockSide, ChunkScene};

    fn log_stats(label: &str, mesh: &Mesh) {
        let per_side: Vec<usize> = BlockSide::all().iter().map(|side| mesh.quads_on(*side)).collect();
        info!(
            "{}: {} quads, {} vertices, {} floats, per side {:?}",
            label,
            mesh.quad_count(),
            mesh.vertex_count(),
            mesh.float_len(),
            per_side
        );
    }

    init_logging();
    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    let mut scene = ChunkScene::from_config(&config)?;
    log_stats("Initial mesh", scene.mesh());

    let start = Instant::now();
    let poll_period = config.drift_interval() / 4;
    let mut ticks = 0;
    while ticks < DEMO_TICKS {
        std::thread::sleep(poll_period);
        if scene.poll(start.elapsed())? {
            ticks += 1;
            log_stats(&format!("Tick {}", ticks), scene.mesh());
        }
    }
    Ok(())
}
