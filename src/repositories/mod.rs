pub mod cart_repository;
pub mod catalog_repository;

pub use cart_repository::*;
pub use catalog_repository::*;
