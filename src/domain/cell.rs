/// Cell represents the fundamental unit in Conway's Game of Life.
/// Stored in generation buffers as `0` (dead) or `1` (alive).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Buffer representation of the state
    pub const fn to_bit(self) -> u32 {
        match self {
            Cell::Alive => 1,
            Cell::Dead => 0,
        }
    }

    /// Decode a buffer value, rejecting anything outside {0, 1}
    pub const fn from_bit(bit: u32) -> Option<Self> {
        match bit {
            0 => Some(Cell::Dead),
            1 => Some(Cell::Alive),
            _ => None,
        }
    }

    pub const fn from_alive(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }

    /// The life rule shared by every kernel, including `step.wgsl`:
    /// 1. Exactly 2 live neighbors: the cell keeps its state
    /// 2. Exactly 3 live neighbors: the cell is alive (survival or birth)
    /// 3. Anything else: the cell is dead
    pub const fn evolve(self, neighbors: u8) -> Self {
        match neighbors {
            2 => self,
            3 => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underpopulation() {
        assert_eq!(Cell::Alive.evolve(0), Cell::Dead);
        assert_eq!(Cell::Alive.evolve(1), Cell::Dead);
    }

    #[test]
    fn test_two_neighbors_keeps_state() {
        assert_eq!(Cell::Alive.evolve(2), Cell::Alive);
        assert_eq!(Cell::Dead.evolve(2), Cell::Dead);
    }

    #[test]
    fn test_three_neighbors_is_alive() {
        assert_eq!(Cell::Alive.evolve(3), Cell::Alive);
        assert_eq!(Cell::Dead.evolve(3), Cell::Alive);
    }

    #[test]
    fn test_overpopulation() {
        for n in 4..=8 {
            assert_eq!(Cell::Alive.evolve(n), Cell::Dead);
            assert_eq!(Cell::Dead.evolve(n), Cell::Dead);
        }
    }

    #[test]
    fn test_bit_encoding() {
        assert_eq!(Cell::Alive.to_bit(), 1);
        assert_eq!(Cell::Dead.to_bit(), 0);
        assert_eq!(Cell::from_bit(1), Some(Cell::Alive));
        assert_eq!(Cell::from_bit(0), Some(Cell::Dead));
        assert_eq!(Cell::from_bit(2), None);
    }
}
