pub mod cart_service;
pub mod catalog_service;

pub use cart_service::*;
pub use catalog_service::*;
