//! Dockwire builder modules
//!
//! Fluent configuration of a daemon client provider, split by concern.

pub mod core;
pub mod credentials;
pub mod transport;

pub use self::core::*;
