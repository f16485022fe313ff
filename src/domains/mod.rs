pub mod agv;
pub mod grid;
pub mod inventory;
pub mod logger;
pub mod orders;
pub mod path_planning;

pub use agv::*;
pub use grid::*;
pub use inventory::*;
pub use logger::*;
pub use orders::*;
pub use path_planning::*;
