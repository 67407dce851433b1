//! Backend enum for selecting the step kernel.

use super::{GpuKernel, Kernel, ParallelKernel, SerialKernel};
use crate::error::Result;

/// Where each generation is computed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Backend {
    /// Single-threaded CPU loop
    Serial,
    /// CPU rows spread over rayon
    Parallel,
    /// wgpu compute shader with ping-pong storage buffers
    #[default]
    Gpu,
}

impl Backend {
    /// Get all available backends
    pub fn all() -> Vec<Backend> {
        vec![Backend::Serial, Backend::Parallel, Backend::Gpu]
    }

    /// Display name for the HUD
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Serial => "CPU",
            Backend::Parallel => "CPU+Par",
            Backend::Gpu => "GPU",
        }
    }

    /// Short description for logs
    pub fn description(&self) -> &'static str {
        match self {
            Backend::Serial => "row-major loop on one thread",
            Backend::Parallel => "rows split across the rayon pool",
            Backend::Gpu => "8x8 compute workgroups, A/B storage buffers",
        }
    }

    /// Build the kernel for a grid. Only `Gpu` can fail, with `LifeError::Unsupported`
    /// when the host has no compute-capable adapter.
    pub fn kernel(&self, width: usize, height: usize) -> Result<Box<dyn Kernel>> {
        Ok(match self {
            Backend::Serial => Box::new(SerialKernel),
            Backend::Parallel => Box::new(ParallelKernel),
            Backend::Gpu => Box::new(GpuKernel::new(width, height)?),
        })
    }
}
