//! Browser bindings.
//!
//! The page creates a `WebChunk`, uploads `mesh()` as a vertex buffer and calls
//! `poll(performance.now())` every frame. Whenever `poll` returns `true` the mesh was
//! replaced and must be uploaded again.

use wasm_bindgen::prelude::*;

use crate::{
    config::SceneConfig,
    engine_state::{voxels::drift::elapsed_from_millis, ChunkScene},
    error::VoxelError,
};

fn to_js(error: VoxelError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Sets up logging and panic reporting. Runs automatically when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    crate::init_logging();
}

/// A chunk scene owned by the page.
#[wasm_bindgen]
pub struct WebChunk {
    scene: ChunkScene,
}

#[wasm_bindgen]
impl WebChunk {
    /// The demo scene.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebChunk, JsValue> {
        let scene = ChunkScene::from_config(&SceneConfig::default()).map_err(to_js)?;
        Ok(WebChunk { scene })
    }

    /// A scene described by a JSON config.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WebChunk, JsValue> {
        let config = SceneConfig::from_json_str(json).map_err(to_js)?;
        let scene = ChunkScene::from_config(&config).map_err(to_js)?;
        Ok(WebChunk { scene })
    }

    /// The vertex buffer, four floats per vertex. Arrives in JS as a `Float32Array`.
    pub fn mesh(&self) -> Vec<f32> {
        self.scene.mesh().as_floats().to_vec()
    }

    /// Number of vertices in the current mesh.
    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.scene.mesh().vertex_count()
    }

    /// Moves one block and rebuilds the mesh. Returns whether anything moved.
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        Ok(self.scene.tick().map_err(to_js)?.is_some())
    }

    /// Advances the drift timer to `now_ms` (e.g. `performance.now()`). Returns whether
    /// the mesh was rebuilt.
    pub fn poll(&mut self, now_ms: f64) -> Result<bool, JsValue> {
        let now = elapsed_from_millis(now_ms).map_err(to_js)?;
        self.scene.poll(now).map_err(to_js)
    }
}
