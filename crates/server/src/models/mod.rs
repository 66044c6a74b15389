//! Domain types for the shop.

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::CartLine;
pub use product::Product;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
