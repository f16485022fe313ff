pub mod cell;
pub mod grid;

pub use cell::*;
pub use grid::*;
