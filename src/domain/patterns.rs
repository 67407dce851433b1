use super::{Cell, GenerationBuffer};
use crate::error::{LifeError, Result};

/// Represents a pattern that can be placed on the grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<(usize, usize)>, // Relative coordinates of alive cells
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: Vec<(usize, usize)>) -> Self {
        let width = cells.iter().map(|(x, _)| *x).max().unwrap_or(0) + 1;
        let height = cells.iter().map(|(_, y)| *y).max().unwrap_or(0) + 1;
        Self { name, description, width, height, cells }
    }

    /// A pattern fits if it does not touch itself across the wrapped edges
    pub fn fits(&self, grid_width: usize, grid_height: usize) -> bool {
        self.width + 2 <= grid_width && self.height + 2 <= grid_height
    }

    /// Place pattern on grid with its top-left corner at (x, y), wrapping at the edges
    pub fn place_on(&self, grid: &mut GenerationBuffer, x: usize, y: usize) {
        let (w, h) = grid.dimensions();
        for (dx, dy) in &self.cells {
            grid.set((x + dx) % w, (y + dy) % h, Cell::Alive);
        }
    }

    /// A fresh grid with the pattern centered on it
    pub fn centered(&self, grid_width: usize, grid_height: usize) -> Result<GenerationBuffer> {
        if !self.fits(grid_width, grid_height) {
            return Err(LifeError::InvalidPattern {
                name: self.name,
                width: self.width,
                height: self.height,
                grid_width,
                grid_height,
            });
        }
        let mut grid = GenerationBuffer::new(grid_width, grid_height)?;
        self.place_on(
            &mut grid,
            (grid_width - self.width) / 2,
            (grid_height - self.height) / 2,
        );
        Ok(grid)
    }
}

/// Classic Game of Life patterns library
pub mod presets {
    use super::*;

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            "Moves diagonally (period 4)",
            vec![
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
        )
    }

    /// Blinker - period 2 oscillator
    pub fn blinker() -> Pattern {
        Pattern::new(
            "Blinker",
            "Oscillator (period 2)",
            vec![(0, 0), (1, 0), (2, 0)],
        )
    }

    /// Toad - period 2 oscillator
    pub fn toad() -> Pattern {
        Pattern::new(
            "Toad",
            "Oscillator (period 2)",
            vec![
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ],
        )
    }

    /// Beacon - period 2 oscillator
    pub fn beacon() -> Pattern {
        Pattern::new(
            "Beacon",
            "Oscillator (period 2)",
            vec![
                (0, 0), (1, 0),
                (0, 1),
                (3, 2),
                (2, 3), (3, 3),
            ],
        )
    }

    /// Lightweight Spaceship (LWSS)
    pub fn lwss() -> Pattern {
        Pattern::new(
            "LWSS",
            "Lightweight Spaceship (period 4)",
            vec![
                (1, 0), (4, 0),
                (0, 1),
                (0, 2), (4, 2),
                (0, 3), (1, 3), (2, 3), (3, 3),
            ],
        )
    }

    /// R-pentomino - classic methuselah (stabilizes after 1103 generations on an infinite plane)
    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "R-pentomino",
            "Methuselah",
            vec![
                (1, 0), (2, 0),
                (0, 1), (1, 1),
                (1, 2),
            ],
        )
    }

    /// Block - simple still life
    pub fn block() -> Pattern {
        Pattern::new(
            "Block",
            "Still life",
            vec![
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ],
        )
    }

    /// Get all available patterns
    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            glider(),
            blinker(),
            toad(),
            beacon(),
            lwss(),
            r_pentomino(),
            block(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::step;

    #[test]
    fn test_pattern_bounds() {
        let glider = presets::glider();
        assert_eq!((glider.width, glider.height), (3, 3));
        let lwss = presets::lwss();
        assert_eq!((lwss.width, lwss.height), (5, 4));
    }

    #[test]
    fn test_centered_blinker() {
        let grid = presets::blinker().centered(5, 5).unwrap();
        assert_eq!(
            grid.to_string(),
            [".....", ".....", ".###.", ".....", "....."].join("\n")
        );
    }

    #[test]
    fn test_pattern_too_large() {
        assert!(matches!(
            presets::lwss().centered(6, 6),
            Err(LifeError::InvalidPattern { name: "LWSS", .. })
        ));
    }

    #[test]
    fn test_place_on_wraps() {
        let mut grid = GenerationBuffer::new(4, 4).unwrap();
        presets::block().place_on(&mut grid, 3, 3);
        assert!(grid.is_alive(3, 3));
        assert!(grid.is_alive(0, 3));
        assert!(grid.is_alive(3, 0));
        assert!(grid.is_alive(0, 0));
    }

    #[test]
    fn test_oscillators_have_period_two() {
        for pattern in [presets::blinker(), presets::toad(), presets::beacon()] {
            let start = pattern.centered(10, 10).unwrap();
            let once = step(&start);
            assert_ne!(once, start, "{} should change", pattern.name);
            assert_eq!(step(&once), start, "{} should return", pattern.name);
        }
    }

    #[test]
    fn test_glider_translates_after_four_steps() {
        let start = presets::glider().centered(12, 12).unwrap();
        let mut grid = start.clone();
        for _ in 0..4 {
            grid = step(&grid);
        }

        let mut shifted = GenerationBuffer::new(12, 12).unwrap();
        for (x, y, cell) in start.iter_cells() {
            if cell.is_alive() {
                shifted.set((x + 1) % 12, (y + 1) % 12, Cell::Alive);
            }
        }
        assert_eq!(grid, shifted);
    }

    #[test]
    fn test_presets_fit_default_grid() {
        let patterns = presets::all_patterns();
        assert_eq!(patterns.len(), 7);
        for pattern in &patterns {
            assert!(pattern.fits(32, 32), "{} does not fit", pattern.name);
            assert!(!pattern.description.is_empty());
        }
    }
}
