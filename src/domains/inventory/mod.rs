pub mod ports;
pub mod product;

pub use ports::*;
pub use product::*;
