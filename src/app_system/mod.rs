//! System composition, session lifecycle, and observability setup.

pub mod shell;
pub mod storefront;
pub mod tracing;

pub use shell::*;
pub use storefront::*;
pub use self::tracing::*;
