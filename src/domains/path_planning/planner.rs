use super::astar;
use super::path::Path;
use crate::domains::grid::{Cell, Grid};
use std::sync::Arc;

/// Planner bound to the grid loaded at process start.
#[derive(Debug, Clone)]
pub struct PathPlanner {
    grid: Arc<Grid>,
}

impl PathPlanner {
    pub fn new(grid: Arc<Grid>) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn plan(&self, start: Cell, goal: Cell) -> Path {
        let path = astar::plan(&self.grid, start, goal);
        tracing::debug!(
            "Planned {} -> {}: {} cells",
            start,
            goal,
            path.len()
        );
        path
    }
}
