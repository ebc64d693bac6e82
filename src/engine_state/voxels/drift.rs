//! # Drift Module
//!
//! The drift driver makes a static scene feel alive: at a fixed interval it picks one
//! occupied cell and relocates it to a nearby empty cell, after which the owner rebuilds
//! the whole mesh.
//!
//! ## State Machine
//!
//! `Idle` → (interval elapsed) → `Mutating` → `Remeshing` → `Idle`
//!
//! The driver only performs the mutation; the scene that owns it runs the remesh between
//! [`DriftDriver::begin_remesh`] and [`DriftDriver::finish`]. The clock is supplied by the
//! caller as time elapsed since an arbitrary origin, so native and browser hosts can drive
//! it from whatever frame clock they have.

use std::time::Duration;

use cgmath::Point3;
use log::debug;

use crate::error::{Result, VoxelError};

use super::chunk::{Chunk, CHUNK_DIMENSION};

/// Interval between relocations when none is configured.
pub const DEFAULT_DRIFT_INTERVAL: Duration = Duration::from_millis(500);

/// Upper bound on random-walk steps before a tick gives up. Only reachable when the
/// neighbourhood of the source is packed solid.
const MAX_WALK_STEPS: usize = 4096;

/// Converts a millisecond host clock reading (such as `performance.now()`) into the
/// elapsed time `DriftDriver::poll` expects. Negative readings count as zero.
///
/// # Errors
/// `InvalidTimestamp` for NaN, infinite or unrepresentably large readings.
pub fn elapsed_from_millis(now_ms: f64) -> Result<Duration> {
    if !now_ms.is_finite() {
        return Err(VoxelError::InvalidTimestamp(now_ms));
    }
    Duration::try_from_secs_f64(now_ms.max(0.0) / 1000.0)
        .map_err(|_| VoxelError::InvalidTimestamp(now_ms))
}

/// Where the driver is in its tick cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Waiting for the interval to elapse.
    Idle,
    /// A block is being relocated.
    Mutating,
    /// The owner is rebuilding the mesh.
    Remeshing,
}

/// A single applied move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Relocation {
    /// Where the block was.
    pub from: Point3<usize>,
    /// Where the block is now.
    pub to: Point3<usize>,
}

/// Moves one random block per interval.
pub struct DriftDriver {
    rng: fastrand::Rng,
    interval: Duration,
    /// Clock reading of the last time the driver fired, or of the first poll.
    last_fire: Option<Duration>,
    state: DriverState,
    relocations: u64,
}

impl DriftDriver {
    /// Creates a driver firing every `interval`. A `seed` makes the sequence of moves
    /// reproducible.
    pub fn new(interval: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        DriftDriver {
            rng,
            interval,
            last_fire: None,
            state: DriverState::Idle,
            relocations: 0,
        }
    }

    /// Current tick-cycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Time between firings.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of relocations applied so far.
    pub fn relocations(&self) -> u64 {
        self.relocations
    }

    /// Reports whether the timer fired at clock reading `now`.
    ///
    /// The first call only starts the clock. Afterwards the timer fires once per elapsed
    /// interval; a late poll fires once and the schedule restarts from `now`.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.last_fire {
            None => {
                self.last_fire = Some(now);
                false
            }
            Some(last) if now.saturating_sub(last) >= self.interval => {
                self.last_fire = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    /// Moves one uniformly chosen occupied cell to an empty cell reached by a random walk.
    ///
    /// Each step adds an offset from `{-1, 0, 1}³` to the current position, clamped to the
    /// grid, until the position is empty. Leaves the driver in `Mutating`.
    ///
    /// # Returns
    /// The applied move, or `None` if the chunk is empty or no empty cell was found
    /// within the step limit. The chunk is unchanged in that case.
    pub fn relocate(&mut self, chunk: &mut Chunk) -> Result<Option<Relocation>> {
        self.state = DriverState::Mutating;

        let occupied = chunk.occupied_count();
        if occupied == 0 {
            return Ok(None);
        }
        let Some(from) = chunk.nth_occupied(self.rng.usize(..occupied)) else {
            return Ok(None);
        };

        let mut to = from;
        for _ in 0..MAX_WALK_STEPS {
            to = Point3::new(self.step(to.x), self.step(to.y), self.step(to.z));
            if !chunk.is_block_solid(to.x, to.y, to.z) {
                chunk.move_cell(from, to)?;
                self.relocations += 1;
                debug!("Drifted block from {:?} to {:?}", from, to);
                return Ok(Some(Relocation { from, to }));
            }
        }

        debug!("No empty cell found near {:?}", from);
        Ok(None)
    }

    /// Marks the mutation as applied and the remesh as started.
    pub fn begin_remesh(&mut self) {
        self.state = DriverState::Remeshing;
    }

    /// Returns the driver to `Idle`.
    pub fn finish(&mut self) {
        self.state = DriverState::Idle;
    }

    fn step(&mut self, coordinate: usize) -> usize {
        let moved = coordinate as i64 + self.rng.i64(-1..=1);
        moved.clamp(0, CHUNK_DIMENSION as i64 - 1) as usize
    }
}

impl Default for DriftDriver {
    fn default() -> Self {
        Self::new(DEFAULT_DRIFT_INTERVAL, None)
    }
}
