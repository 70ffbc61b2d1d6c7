//! Daemon connection management and establishment

pub mod connector;
pub mod endpoint;
pub mod spec;
pub mod stream;

pub use connector::DaemonConnector;
pub use endpoint::DaemonEndpoint;
pub use spec::ConnectionSpec;
pub use stream::DaemonStream;
