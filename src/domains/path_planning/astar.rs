//! A* search on the 4-connected warehouse grid.
//!
//! Unit edge cost, Manhattan heuristic. The heuristic is admissible and
//! consistent for orthogonal unit moves, so the first time the goal is popped
//! from the frontier its path is cost-optimal.
//!
//! The frontier is a binary heap ordered on `f = g + h`. Ties on `f` are
//! broken by smaller `h` (deeper towards the goal), then by the smaller
//! `(row, col)`, which makes the returned path deterministic.

use super::path::Path;
use crate::domains::grid::{Cell, Grid};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    cell: Cell,
    g: usize,
    h: usize,
}

impl FrontierEntry {
    fn f(&self) -> usize {
        self.g + self.h
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .f()
            .cmp(&self.f())
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plan a minimal-cost path from `start` to `goal`.
///
/// Returns the empty path when the goal cannot be reached. Start or goal
/// outside the grid, or on a blocked cell, also yield the empty path.
pub fn plan(grid: &Grid, start: Cell, goal: Cell) -> Path {
    if !grid.is_traversable(start) || !grid.is_traversable(goal) {
        return Path::empty();
    }

    let index = |c: Cell| c.row * grid.cols() + c.col;
    let size = grid.rows() * grid.cols();
    let mut g_score = vec![usize::MAX; size];
    let mut came_from: Vec<Option<Cell>> = vec![None; size];
    let mut open_set = BinaryHeap::new();

    g_score[index(start)] = 0;
    open_set.push(FrontierEntry {
        cell: start,
        g: 0,
        h: start.manhattan(&goal),
    });

    while let Some(current) = open_set.pop() {
        // Stale entry superseded by a cheaper route
        if current.g > g_score[index(current.cell)] {
            continue;
        }

        if current.cell == goal {
            return reconstruct_path(&came_from, index, goal);
        }

        let tentative_g = current.g + 1;
        for neighbor in grid.neighbors(current.cell) {
            let i = index(neighbor);
            if tentative_g < g_score[i] {
                came_from[i] = Some(current.cell);
                g_score[i] = tentative_g;
                open_set.push(FrontierEntry {
                    cell: neighbor,
                    g: tentative_g,
                    h: neighbor.manhattan(&goal),
                });
            }
        }
    }

    Path::empty()
}

fn reconstruct_path(
    came_from: &[Option<Cell>],
    index: impl Fn(Cell) -> usize,
    goal: Cell,
) -> Path {
    let mut cells = vec![goal];
    let mut current = goal;
    while let Some(previous) = came_from[index(current)] {
        cells.push(previous);
        current = previous;
    }
    cells.reverse();
    Path::new(cells)
}
