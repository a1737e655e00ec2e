//! HTTP access to the external REST backend: the response envelope, the
//! error taxonomy, session persistence, and the typed endpoint surface.

pub mod client;
pub mod envelope;
pub mod error;
pub mod session;

pub use client::*;
pub use envelope::*;
pub use error::*;
pub use session::*;
