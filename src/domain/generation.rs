use std::fmt;

use super::Cell;
use crate::error::{LifeError, Result};

/// One generation of the automaton: `width * height` cells in row-major order.
///
/// Cells are stored as `u32` so the buffer can be written to a GPU storage
/// buffer as-is. Every value is 0 or 1.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GenerationBuffer {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl GenerationBuffer {
    /// Create a new buffer with all cells dead
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![0; width * height],
        })
    }

    /// Wrap existing cell values, validating length and the binary domain
    pub fn from_cells(width: usize, height: usize, cells: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        if cells.len() != width * height {
            return Err(LifeError::LengthMismatch {
                expected: width * height,
                actual: cells.len(),
            });
        }
        let invalid = cells
            .iter()
            .enumerate()
            .find(|(_, v)| Cell::from_bit(**v).is_none());
        if let Some((index, &value)) = invalid {
            return Err(LifeError::InvalidCell { index, value });
        }
        Ok(Self { width, height, cells })
    }

    /// Parse a grid drawn as text, one string per row (`#` or `O` alive, `.` dead).
    /// The first string is row `y = 0`.
    pub fn from_ascii(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut buffer = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(LifeError::Parse(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '#' | 'O' => Cell::Alive,
                    '.' => Cell::Dead,
                    other => {
                        return Err(LifeError::Parse(format!(
                            "unexpected character {:?} at ({}, {})",
                            other, x, y
                        )));
                    }
                };
                buffer.set(x, y, cell);
            }
        }

        Ok(buffer)
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn has_dimensions(&self, width: usize, height: usize) -> bool {
        self.width == width && self.height == height
    }

    /// Convert 2D coordinates to 1D index
    pub const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height)
            .then(|| Cell::from_alive(self.cells[self.index(x, y)] == 1))
    }

    /// Out-of-range coordinates read as dead
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(Cell::is_alive)
    }

    /// Set cell at position; out-of-range coordinates are ignored
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell.to_bit();
        }
    }

    /// Raw cell values, row-major
    pub fn as_slice(&self) -> &[u32] {
        &self.cells
    }

    /// Raw mutable access for kernels. Writers must only store 0 or 1.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.cells
    }

    /// Count live neighbors using toroidal wrapping (grid wraps like a torus)
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let w = self.width;
        let h = self.height;
        let xs = [(x + w - 1) % w, x, (x + 1) % w];
        let ys = [(y + h - 1) % h, y, (y + 1) % h];

        let mut count = 0u8;
        for (j, &ny) in ys.iter().enumerate() {
            for (i, &nx) in xs.iter().enumerate() {
                if i == 1 && j == 1 {
                    continue;
                }
                count += self.cells[ny * w + nx] as u8;
            }
        }
        count
    }

    /// Count total alive cells
    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Clear all cells to dead state
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Overwrite every cell from a coordinate function
    pub fn fill_with(&mut self, mut f: impl FnMut(usize, usize) -> Cell) {
        let w = self.width;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = f(i % w, i / w).to_bit();
        }
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &bit)| (i % w, i / w, Cell::from_alive(bit == 1)))
    }
}

impl fmt::Display for GenerationBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for &bit in row {
                f.write_str(if bit == 1 { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_dead() {
        let buffer = GenerationBuffer::new(4, 3).unwrap();
        assert_eq!(buffer.dimensions(), (4, 3));
        assert_eq!(buffer.as_slice().len(), 12);
        assert_eq!(buffer.count_alive(), 0);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            GenerationBuffer::new(0, 5),
            Err(LifeError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(GenerationBuffer::new(5, 0).is_err());
    }

    #[test]
    fn test_row_major_indexing() {
        let mut buffer = GenerationBuffer::new(5, 4).unwrap();
        buffer.set(3, 2, Cell::Alive);
        assert_eq!(buffer.index(3, 2), 13);
        assert_eq!(buffer.as_slice()[13], 1);
        assert_eq!(buffer.get(3, 2), Some(Cell::Alive));
        assert_eq!(buffer.get(5, 0), None);
        assert!(!buffer.is_alive(9, 9));
    }

    #[test]
    fn test_from_cells_validates() {
        assert!(GenerationBuffer::from_cells(2, 2, vec![0, 1, 1, 0]).is_ok());
        assert!(matches!(
            GenerationBuffer::from_cells(2, 2, vec![0, 1, 2, 0]),
            Err(LifeError::InvalidCell { index: 2, value: 2 })
        ));
        assert!(matches!(
            GenerationBuffer::from_cells(2, 2, vec![0, 1, 1]),
            Err(LifeError::LengthMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_ascii_parse_and_display() {
        let rows = [".#..", "##.#", "...."];
        let buffer = GenerationBuffer::from_ascii(&rows).unwrap();
        assert_eq!(buffer.dimensions(), (4, 3));
        assert!(buffer.is_alive(1, 0));
        assert!(buffer.is_alive(0, 1));
        assert!(buffer.is_alive(3, 1));
        assert_eq!(buffer.count_alive(), 4);
        assert_eq!(buffer.to_string(), rows.join("\n"));
    }

    #[test]
    fn test_ascii_rejects_ragged_rows() {
        assert!(matches!(
            GenerationBuffer::from_ascii(&["...", ".."]),
            Err(LifeError::Parse(_))
        ));
        assert!(matches!(
            GenerationBuffer::from_ascii(&["..x"]),
            Err(LifeError::Parse(_))
        ));
    }

    #[test]
    fn test_corner_neighbors_wrap() {
        let (w, h) = (6, 5);
        let mut buffer = GenerationBuffer::new(w, h).unwrap();
        let wrapped = [
            (w - 1, h - 1),
            (w - 1, 0),
            (w - 1, 1),
            (0, h - 1),
            (0, 1),
            (1, h - 1),
            (1, 0),
            (1, 1),
        ];
        for &(x, y) in &wrapped {
            buffer.set(x, y, Cell::Alive);
        }
        assert_eq!(buffer.live_neighbors(0, 0), 8);

        // A cell that is not adjacent across any edge does not count
        buffer.set(3, 2, Cell::Alive);
        assert_eq!(buffer.live_neighbors(0, 0), 8);

        // The cell itself is never its own neighbor
        buffer.set(0, 0, Cell::Alive);
        assert_eq!(buffer.live_neighbors(0, 0), 8);
    }

    #[test]
    fn test_fill_with_coordinates() {
        let mut buffer = GenerationBuffer::new(3, 2).unwrap();
        buffer.fill_with(|x, y| Cell::from_alive(x == y));
        assert_eq!(buffer.to_string(), "#..\n.#.");
    }
}
