//! Initial seeding policies for a simulation run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Cell, GenerationBuffer, Pattern};
use crate::error::{LifeError, Result};

/// Share of live cells used by the default random seeding
pub const DEFAULT_DENSITY: f64 = 0.4;

/// How the first generation is filled
#[derive(Clone, Debug, PartialEq)]
pub enum SeedPolicy {
    /// Each cell is alive with probability `density`.
    /// A fixed `seed` makes the layout reproducible.
    Random { density: f64, seed: Option<u64> },
    /// Cell `i` (row-major) is alive when `i` is odd
    Parity,
    /// A single pattern centered on an empty grid
    Pattern(Pattern),
    /// A caller-supplied buffer, used as-is
    Explicit(GenerationBuffer),
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self::random(DEFAULT_DENSITY)
    }
}

impl SeedPolicy {
    pub fn random(density: f64) -> Self {
        Self::Random { density, seed: None }
    }

    pub fn seeded(density: f64, seed: u64) -> Self {
        Self::Random { density, seed: Some(seed) }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Random { .. } => "Random",
            Self::Parity => "Parity",
            Self::Pattern(pattern) => pattern.name,
            Self::Explicit(_) => "Explicit",
        }
    }

    /// Check the policy against the grid without building anything
    pub fn validate(&self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        match self {
            Self::Random { density, .. } if !(0.0..=1.0).contains(density) => {
                Err(LifeError::InvalidDensity(*density))
            }
            Self::Pattern(pattern) if !pattern.fits(width, height) => Err(LifeError::InvalidPattern {
                name: pattern.name,
                width: pattern.width,
                height: pattern.height,
                grid_width: width,
                grid_height: height,
            }),
            Self::Explicit(buffer) if !buffer.has_dimensions(width, height) => {
                let (actual_width, actual_height) = buffer.dimensions();
                Err(LifeError::DimensionMismatch {
                    expected_width: width,
                    expected_height: height,
                    actual_width,
                    actual_height,
                })
            }
            _ => Ok(()),
        }
    }

    /// Build the first generation for a `width x height` grid
    pub fn generate(&self, width: usize, height: usize) -> Result<GenerationBuffer> {
        self.validate(width, height)?;
        match self {
            Self::Random { density, seed } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(*seed),
                    None => StdRng::from_os_rng(),
                };
                let mut grid = GenerationBuffer::new(width, height)?;
                grid.fill_with(|_, _| Cell::from_alive(rng.random_bool(*density)));
                Ok(grid)
            }
            Self::Parity => {
                let mut grid = GenerationBuffer::new(width, height)?;
                grid.fill_with(|x, y| Cell::from_alive((y * width + x) % 2 == 1));
                Ok(grid)
            }
            Self::Pattern(pattern) => pattern.centered(width, height),
            Self::Explicit(buffer) => Ok(buffer.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;

    #[test]
    fn test_random_density_is_close() {
        let grid = SeedPolicy::seeded(0.4, 7).generate(100, 100).unwrap();
        let alive = grid.count_alive();
        assert!(
            (3_500..=4_500).contains(&alive),
            "expected ~4000 alive cells, got {}",
            alive
        );
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let a = SeedPolicy::seeded(0.4, 42).generate(32, 32).unwrap();
        let b = SeedPolicy::seeded(0.4, 42).generate(32, 32).unwrap();
        let c = SeedPolicy::seeded(0.4, 43).generate(32, 32).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_density_extremes() {
        assert_eq!(SeedPolicy::random(0.0).generate(8, 8).unwrap().count_alive(), 0);
        assert_eq!(SeedPolicy::random(1.0).generate(8, 8).unwrap().count_alive(), 64);
    }

    #[test]
    fn test_invalid_density() {
        assert!(matches!(
            SeedPolicy::random(1.5).generate(8, 8),
            Err(LifeError::InvalidDensity(d)) if d == 1.5
        ));
        assert!(SeedPolicy::random(-0.1).validate(8, 8).is_err());
    }

    #[test]
    fn test_parity_alternates_by_index() {
        let grid = SeedPolicy::Parity.generate(3, 3).unwrap();
        assert_eq!(grid.as_slice(), &[0, 1, 0, 1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_pattern_policy_centers() {
        let grid = SeedPolicy::Pattern(presets::block()).generate(6, 6).unwrap();
        assert_eq!(grid.count_alive(), 4);
        assert!(grid.is_alive(2, 2));
        assert!(grid.is_alive(3, 3));
    }

    #[test]
    fn test_explicit_must_match_dimensions() {
        let buffer = GenerationBuffer::from_ascii(&["#.", ".#"]).unwrap();
        let policy = SeedPolicy::Explicit(buffer.clone());
        assert_eq!(policy.generate(2, 2).unwrap(), buffer);
        assert!(matches!(
            policy.generate(3, 2),
            Err(LifeError::DimensionMismatch { expected_width: 3, actual_width: 2, .. })
        ));
    }

    #[test]
    fn test_default_is_random_forty_percent() {
        assert_eq!(
            SeedPolicy::default(),
            SeedPolicy::Random { density: 0.4, seed: None }
        );
    }
}
