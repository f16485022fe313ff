pub mod requests;
pub mod warehouse_service;

pub use requests::*;
pub use warehouse_service::*;
