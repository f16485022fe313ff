use serde::{Deserialize, Serialize};
use std::fmt;

/// One discrete grid position. Serialized as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Number of orthogonal steps between two cells, ignoring obstacles.
    pub fn manhattan(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when `other` is exactly one orthogonal step away.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<[usize; 2]> for Cell {
    fn from(rc: [usize; 2]) -> Self {
        Self::new(rc[0], rc[1])
    }
}

impl From<Cell> for [usize; 2] {
    fn from(cell: Cell) -> Self {
        [cell.row, cell.col]
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_wire_form_is_pair() {
        let cell = Cell::new(3, 2);
        assert_eq!(serde_json::to_string(&cell).unwrap(), "[3,2]");
        let parsed: Cell = serde_json::from_str("[8,0]").unwrap();
        assert_eq!(parsed, Cell::new(8, 0));
    }

    #[test]
    fn test_manhattan_and_adjacency() {
        let a = Cell::new(0, 0);
        let b = Cell::new(2, 3);
        assert_eq!(a.manhattan(&b), 5);
        assert_eq!(b.manhattan(&a), 5);
        assert!(a.is_adjacent(&Cell::new(0, 1)));
        assert!(!a.is_adjacent(&Cell::new(1, 1)));
        assert!(!a.is_adjacent(&a));
    }
}
