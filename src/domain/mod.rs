//! Domain entities as consumed and produced by the REST backend, plus the
//! small amount of math the client asserts over them (quantity clamping,
//! display totals, the order status machine).

pub mod cart;
pub mod order;
pub mod product;
pub mod review;
pub mod user;
pub mod wishlist;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use review::*;
pub use user::*;
pub use wishlist::*;
