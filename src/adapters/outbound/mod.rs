pub mod file_logger;
pub mod memory_store;
pub mod multi_logger;
pub mod memory_logger;
pub mod postgres;
pub mod tracing_logger;

pub use file_logger::*;
pub use memory_store::*;
pub use multi_logger::*;
pub use memory_logger::*;
pub use postgres::*;
pub use tracing_logger::*;
