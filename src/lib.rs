// Domain layer - Core business logic
pub mod domain;

// Application layer - Tick scheduling
pub mod application;

// Ambient - configuration and errors
pub mod config;
pub mod error;

// Infrastructure layer - rendering, input
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Backend, Cell, GenerationBuffer, Kernel, SeedPolicy, Stepper, presets, step};
pub use application::Simulation;
pub use config::SimulationConfig;
pub use error::LifeError;
