pub mod order;
pub mod ports;

pub use order::*;
pub use ports::*;
