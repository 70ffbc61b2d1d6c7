//! Daemon clients
//!
//! [`DaemonClientProvider`] turns a configuration and a credential supplier
//! into [`DaemonClient`]s, each carrying its own transport context.

pub mod core;
pub mod policy;
pub mod provider;
pub mod response;
pub mod stats;

pub use self::core::DaemonClient;

pub use policy::TransportPolicy;
pub use provider::DaemonClientProvider;
pub use response::Response;
pub use stats::{ClientStats, ClientStatsSnapshot};
