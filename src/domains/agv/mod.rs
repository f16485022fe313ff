pub mod aggregate;
pub mod events;
pub mod executor;

pub use aggregate::*;
pub use events::*;
pub use executor::*;
