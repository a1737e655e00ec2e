//! Per-view state containers: each holds the state behind one screen,
//! loaded wholesale from the backend and filtered/derived in memory.
//!
//! Every loading store stamps requests with a generation counter and
//! discards responses whose generation is no longer the latest, so a slow
//! response can never clobber the result of a later load.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod reviews;
pub mod vendor_orders;
pub mod wishlist;

pub use cart::*;
pub use catalog::*;
pub use checkout::*;
pub use orders::*;
pub use reviews::*;
pub use vendor_orders::*;
pub use wishlist::*;
