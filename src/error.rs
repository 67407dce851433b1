use thiserror::Error;

/// Errors raised while configuring or running a simulation.
///
/// Buffer length mismatches inside `Stepper::step` are caller bugs and panic
/// instead of showing up here.
#[derive(Debug, Error)]
pub enum LifeError {
    /// The host cannot provide GPU compute.
    #[error("GPU compute is not supported in this environment: {0}")]
    Unsupported(String),

    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("buffer is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("buffer holds {actual} cells, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("cell {index} has value {value}, cells must be 0 or 1")]
    InvalidCell { index: usize, value: u32 },

    #[error("seed density must be within 0.0..=1.0, got {0}")]
    InvalidDensity(f64),

    #[error("tick interval must be positive")]
    InvalidInterval,

    #[error("pattern {name} ({width}x{height}) does not fit a {grid_width}x{grid_height} grid")]
    InvalidPattern {
        name: &'static str,
        width: usize,
        height: usize,
        grid_width: usize,
        grid_height: usize,
    },

    #[error("malformed grid text: {0}")]
    Parse(String),

    /// Device-side failure after setup (readback, device loss).
    #[error("GPU error: {0}")]
    Gpu(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;
