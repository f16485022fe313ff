pub mod astar;
pub mod path;
pub mod planner;

pub use astar::plan;
pub use path::*;
pub use planner::*;
