mod cell;
mod generation;
mod kernel;
mod gpu;
mod stepper;
mod seed;
mod patterns;
mod backend;

pub use cell::Cell;
pub use generation::GenerationBuffer;
pub use kernel::{Kernel, SerialKernel, ParallelKernel, step, next_cell};
pub use gpu::GpuKernel;
pub use stepper::Stepper;
pub use seed::{SeedPolicy, DEFAULT_DENSITY};
pub use patterns::{Pattern, presets};
pub use backend::Backend;
