pub mod cart;
pub mod catalog;
pub mod melon;
pub mod price;
pub mod session;

pub use cart::{Cart, CartEntry, CartError, CartLine, CartSummary};
pub use catalog::{Catalog, CatalogError};
pub use melon::Melon;
pub use price::{Price, PriceError};
pub use session::{SessionError, SessionId, DEFAULT_SESSION};
