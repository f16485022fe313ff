use super::cell::Cell;
use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Contents of one grid cell. Pickup and delivery stations are markers on
/// otherwise free floor and can be driven over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Free,
    Blocked,
    Pickup,
    Delivery,
}

impl CellKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellKind::Free),
            1 => Some(CellKind::Blocked),
            2 => Some(CellKind::Pickup),
            3 => Some(CellKind::Delivery),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            CellKind::Free => 0,
            CellKind::Blocked => 1,
            CellKind::Pickup => 2,
            CellKind::Delivery => 3,
        }
    }

    pub fn is_traversable(self) -> bool {
        self != CellKind::Blocked
    }
}

/// Immutable rows x cols occupancy map.
///
/// Serialized as a list of rows of cell codes (`0` free, `1` blocked,
/// `2` pickup, `3` delivery).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
}

// Order in which neighbours are generated: down, up, right, left.
const STEPS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Grid {
    pub fn from_rows(rows: &[Vec<u8>]) -> DomainResult<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map(Vec::len).unwrap_or(0);
        if row_count == 0 || col_count == 0 {
            return Err(DomainError::InvalidGrid {
                reason: "grid must have at least one row and one column".to_string(),
            });
        }

        let mut cells = Vec::with_capacity(row_count * col_count);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != col_count {
                return Err(DomainError::InvalidGrid {
                    reason: format!("row {} has {} columns, expected {}", r, row.len(), col_count),
                });
            }
            for (c, &code) in row.iter().enumerate() {
                let kind = CellKind::from_code(code).ok_or_else(|| DomainError::InvalidGrid {
                    reason: format!("unknown cell code {} at ({},{})", code, r, c),
                })?;
                cells.push(kind);
            }
        }

        Ok(Self {
            rows: row_count,
            cols: col_count,
            cells,
        })
    }

    /// An obstacle-free grid.
    pub fn open(rows: usize, cols: usize) -> DomainResult<Self> {
        Self::from_rows(&vec![vec![0; cols]; rows])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Convert signed boundary coordinates into a cell of this grid.
    pub fn cell_at(&self, row: i64, col: i64) -> DomainResult<Cell> {
        let out_of_bounds = || DomainError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        };
        let r = usize::try_from(row).map_err(|_| out_of_bounds())?;
        let c = usize::try_from(col).map_err(|_| out_of_bounds())?;
        let cell = Cell::new(r, c);
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(out_of_bounds())
        }
    }

    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        if self.contains(cell) {
            Some(self.cells[cell.row * self.cols + cell.col])
        } else {
            None
        }
    }

    /// Out-of-bounds cells are never traversable.
    pub fn is_traversable(&self, cell: Cell) -> bool {
        self.kind(cell).map(CellKind::is_traversable).unwrap_or(false)
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.kind(cell) == Some(CellKind::Blocked)
    }

    /// In-bounds, traversable 4-connected neighbours of `cell`.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        STEPS.iter().filter_map(move |&(dr, dc)| {
            let row = cell.row.checked_add_signed(dr)?;
            let col = cell.col.checked_add_signed(dc)?;
            let next = Cell::new(row, col);
            self.is_traversable(next).then_some(next)
        })
    }

    /// Cells of the given kind in row-major order.
    pub fn cells_of(&self, kind: CellKind) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &k)| k == kind)
            .map(move |(i, _)| Cell::new(i / cols, i % cols))
    }

    /// First pickup and first delivery station, if the layout has both.
    pub fn stations(&self) -> Option<(Cell, Cell)> {
        let pickup = self.cells_of(CellKind::Pickup).next()?;
        let delivery = self.cells_of(CellKind::Delivery).next()?;
        Some((pickup, delivery))
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|k| k.code()).collect())
            .collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = DomainError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Grid::from_rows(&rows)
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}
