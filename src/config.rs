//! Simulation configuration and the demo's fixed constants.

use crate::domain::{Backend, SeedPolicy};
use crate::error::{LifeError, Result};

pub const DEFAULT_GRID_SIZE: usize = 32;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;
/// Bounds for the speed keys
pub const MIN_TICK_INTERVAL_MS: u64 = 25;
pub const MAX_TICK_INTERVAL_MS: u64 = 2_000;

/// Everything needed to start a run. Fixed for the lifetime of the process.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub tick_interval_ms: u64,
    pub seed_policy: SeedPolicy,
    pub backend: Backend,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed_policy: SeedPolicy::default(),
            backend: Backend::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    pub fn with_seed_policy(mut self, policy: SeedPolicy) -> Self {
        self.seed_policy = policy;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(LifeError::InvalidInterval);
        }
        self.seed_policy.validate(self.grid_width, self.grid_height)
    }
}
