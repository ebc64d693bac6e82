//! # Engine State Module
//!
//! The scene that ties the engine together: one block registry, one chunk, its current
//! mesh and the drift driver that keeps changing it.
//!
//! ## Key Components
//!
//! * `ChunkScene` - Owns the chunk and keeps its mesh in sync with it
//! * `SharedScene` - A `ChunkScene` behind a read-write lock for threaded hosts
//! * `MeshListener` - Callback for hosts that re-upload the mesh after every rebuild
//! * `rendering` - Vertex format and greedy meshing
//! * `voxels` - Blocks, the chunk grid and the drift driver
//!
//! ## Update Cycle
//!
//! Every mutation of the chunk is followed by a full remesh. The new mesh replaces the
//! old one wholesale and listeners are notified once with the finished buffer, so a
//! reader never sees a partially built mesh.

use std::time::Duration;

use log::info;

use crate::{config::SceneConfig, core::MtResource, error::Result};

use rendering::{Mesh, MeshManager};
use voxels::{
    block::{orientation::Orientation, registry::BlockRegistry},
    chunk::{Cell, Chunk},
    drift::{DriftDriver, DriverState, Relocation},
};

pub mod rendering;
pub mod voxels;

/// Receives every mesh that replaces the previous one.
pub trait MeshListener: Send + Sync {
    /// Called with the new mesh right after it is stored.
    fn on_mesh_replaced(&self, mesh: &Mesh);
}

/// A single chunk together with its registry, current mesh and drift driver.
pub struct ChunkScene {
    registry: BlockRegistry,
    chunk: Chunk,
    mesh_manager: MeshManager,
    driver: DriftDriver,
    listeners: Vec<Box<dyn MeshListener>>,
}

impl ChunkScene {
    /// Creates a scene with an empty chunk.
    ///
    /// # Arguments
    /// * `registry` - Blocks the scene may place
    /// * `drift_interval` - Time between drift ticks when driven through `poll`
    /// * `seed` - Seed for the drift driver, or `None` for a random one
    pub fn new(registry: BlockRegistry, drift_interval: Duration, seed: Option<u64>) -> Self {
        ChunkScene {
            registry,
            chunk: Chunk::new(),
            mesh_manager: MeshManager::new(),
            driver: DriftDriver::new(drift_interval, seed),
            listeners: Vec::new(),
        }
    }

    /// Builds a scene from a config: registers its blocks, fills its regions in order and
    /// generates the first mesh.
    pub fn from_config(config: &SceneConfig) -> Result<Self> {
        let registry = config.build_registry()?;
        let mut scene = Self::new(registry, config.drift_interval(), config.seed);
        for region in &config.regions {
            scene.place(&region.block, region.origin, region.size, region.orientation()?)?;
        }
        scene.remesh()?;
        info!(
            "Scene ready: {} blocks placed, {} quads",
            scene.chunk.occupied_count(),
            scene.mesh().quad_count()
        );
        Ok(scene)
    }

    /// Fills a box with the named block and rebuilds the mesh.
    ///
    /// # Errors
    /// `UnknownBlock` for an unregistered name, `OutOfBounds` if the box leaves the chunk.
    /// The chunk and mesh are unchanged on error.
    pub fn set_region(
        &mut self,
        block: &str,
        origin: [i32; 3],
        size: [i32; 3],
        orientation: Orientation,
    ) -> Result<&Mesh> {
        self.place(block, origin, size, orientation)?;
        self.remesh()
    }

    fn place(&mut self, block: &str, origin: [i32; 3], size: [i32; 3], orientation: Orientation) -> Result<()> {
        let block = self.registry.get(block)?;
        let [x, y, z] = origin;
        let [w, h, d] = size;
        self.chunk.set_region(x, y, z, w, h, d, block, orientation)
    }

    /// The cell at the given coordinates, empty outside the chunk.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Cell {
        self.chunk.get(x, y, z)
    }

    /// The chunk grid.
    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    /// The block registry the chunk refers to.
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// The last complete mesh.
    pub fn mesh(&self) -> &Mesh {
        self.mesh_manager.mesh()
    }

    /// How many meshes have been built since the scene was created.
    pub fn mesh_generation(&self) -> u64 {
        self.mesh_manager.generation()
    }

    /// Meshes the current chunk without touching the stored mesh.
    pub fn generate_mesh(&self) -> Result<Mesh> {
        rendering::meshing::mesh::greedy(&self.chunk, &self.registry)
    }

    /// Rebuilds the mesh, swaps it in and notifies listeners.
    pub fn remesh(&mut self) -> Result<&Mesh> {
        let mesh = self
            .mesh_manager
            .generate_mesh_for_chunk(&self.chunk, &self.registry)?;
        for listener in &self.listeners {
            listener.on_mesh_replaced(mesh);
        }
        Ok(mesh)
    }

    /// Registers a listener called after every mesh replacement.
    pub fn add_listener(&mut self, listener: Box<dyn MeshListener>) {
        self.listeners.push(listener);
    }

    /// Current state of the drift driver.
    pub fn driver_state(&self) -> DriverState {
        self.driver.state()
    }

    /// Relocates one random block and rebuilds the mesh.
    ///
    /// # Returns
    /// The applied move, or `None` when nothing could move. The mesh is only rebuilt
    /// after an actual move.
    pub fn tick(&mut self) -> Result<Option<Relocation>> {
        let result = self.mutate_and_remesh();
        self.driver.finish();
        result
    }

    fn mutate_and_remesh(&mut self) -> Result<Option<Relocation>> {
        let relocation = self.driver.relocate(&mut self.chunk)?;
        if relocation.is_some() {
            self.driver.begin_remesh();
            self.remesh()?;
        }
        Ok(relocation)
    }

    /// Advances the drift timer to clock reading `now` and ticks if it fired.
    ///
    /// # Returns
    /// Whether a tick ran.
    pub fn poll(&mut self, now: Duration) -> Result<bool> {
        if !self.driver.poll(now) {
            return Ok(false);
        }
        self.tick()?;
        Ok(true)
    }
}

/// A `ChunkScene` shared between threads.
///
/// Mutation and remesh run under one write lock, so renderers reading through
/// [`SharedScene::with_mesh`] always see the last complete mesh.
#[derive(Clone)]
pub struct SharedScene {
    scene: MtResource<ChunkScene>,
}

impl SharedScene {
    /// Wraps a scene for sharing between threads.
    pub fn new(scene: ChunkScene) -> Self {
        SharedScene {
            scene: MtResource::new(scene),
        }
    }

    /// Runs `ChunkScene::tick` under the write lock.
    pub fn tick(&self) -> Result<Option<Relocation>> {
        self.scene.get_mut().tick()
    }

    /// Runs `ChunkScene::poll` under the write lock.
    pub fn poll(&self, now: Duration) -> Result<bool> {
        self.scene.get_mut().poll(now)
    }

    /// Runs `f` on the current mesh under a read lock.
    pub fn with_mesh<R>(&self, f: impl FnOnce(&Mesh) -> R) -> R {
        f(self.scene.get().mesh())
    }

    /// Runs `f` on the scene under the write lock.
    pub fn with_scene_mut<R>(&self, f: impl FnOnce(&mut ChunkScene) -> R) -> R {
        f(&mut *self.scene.get_mut())
    }
}
