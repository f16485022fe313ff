use crate::domains::grid::{Cell, Grid};
use serde::{Deserialize, Serialize};

/// Ordered sequence of cells from start to goal. Empty means no path was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells, including start and goal.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Number of unit moves needed to follow the path.
    pub fn cost(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Cells the vehicle moves into; the first cell is where it already stands.
    pub fn steps(&self) -> &[Cell] {
        self.cells.get(1..).unwrap_or(&[])
    }

    /// Every cell is traversable on `grid` and consecutive cells are one
    /// orthogonal step apart.
    pub fn is_valid_on(&self, grid: &Grid) -> bool {
        self.cells.iter().all(|&c| grid.is_traversable(c))
            && self.cells.windows(2).all(|w| w[0].is_adjacent(&w[1]))
    }

    /// Append `next`, dropping its first cell when it repeats our last one.
    pub fn join(mut self, next: Path) -> Path {
        let mut rest = next.cells.into_iter().peekable();
        if let (Some(last), Some(first)) = (self.cells.last(), rest.peek()) {
            if last == first {
                rest.next();
            }
        }
        self.cells.extend(rest);
        self
    }
}

impl From<Vec<Cell>> for Path {
    fn from(cells: Vec<Cell>) -> Self {
        Self::new(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(cells: &[(usize, usize)]) -> Path {
        Path::new(cells.iter().map(|&rc| Cell::from(rc)).collect())
    }

    #[test]
    fn test_steps_skip_first_cell() {
        let p = path(&[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(p.steps(), &[Cell::new(0, 1), Cell::new(0, 2)]);
        assert_eq!(p.cost(), 2);
        assert!(Path::empty().steps().is_empty());
        assert_eq!(Path::empty().cost(), 0);
    }

    #[test]
    fn test_join_drops_repeated_junction() {
        let first = path(&[(2, 0), (1, 0), (0, 0)]);
        let second = path(&[(0, 0), (0, 1)]);
        let joined = first.join(second);
        assert_eq!(joined, path(&[(2, 0), (1, 0), (0, 0), (0, 1)]));
    }

    #[test]
    fn test_validity_checks_adjacency_and_obstacles() {
        let grid = Grid::from_rows(&[vec![0, 0], vec![1, 0]]).unwrap();
        assert!(path(&[(0, 0), (0, 1), (1, 1)]).is_valid_on(&grid));
        assert!(!path(&[(0, 0), (1, 1)]).is_valid_on(&grid));
        assert!(!path(&[(0, 0), (1, 0)]).is_valid_on(&grid));
    }

    #[test]
    fn test_wire_form_is_list_of_pairs() {
        let p = path(&[(0, 0), (0, 1)]);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[[0,0],[0,1]]");
    }
}
