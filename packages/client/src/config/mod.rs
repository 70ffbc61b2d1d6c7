//! Daemon Client Configuration
//!
//! Plain `Default` structs with `with_*` builder methods. The transport
//! policy (timeouts, TLS floor, hostname strategy) is fixed when a client is
//! built from this configuration.

use std::path::PathBuf;
use std::time::Duration;

pub mod env;
pub mod security;
pub mod timeouts;
pub mod validation;

pub use security::{TlsVersion, TransportConfig};
pub use validation::{ConfigResult, ConfigValidator, ConfigurationError};

use crate::connect::DaemonEndpoint;

/// Default daemon connect and read timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for clients of a single container-engine daemon.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub endpoint: DaemonEndpoint,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub tls: TransportConfig,
    pub user_agent: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            endpoint: DaemonEndpoint::default(),
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
            tls: TransportConfig::default(),
            user_agent: concat!("dockwire/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl DaemonConfig {
    #[must_use]
    pub fn new(endpoint: DaemonEndpoint) -> Self {
        Self {
            endpoint,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: DaemonEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Trust only the CA certificate at `path` when verifying the daemon.
    #[must_use]
    pub fn with_ca_cert_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tls.ca_cert_path = Some(path.into());
        self
    }

    /// Accept any daemon certificate when no CA certificate is configured.
    ///
    /// Only meant for development daemons without verifiable certificates.
    #[must_use]
    pub fn with_trust_all_certs(mut self, trust_all: bool) -> Self {
        self.tls.trust_all_certs = trust_all;
        self
    }

    #[must_use]
    pub fn with_relax_hostname(mut self, relax: bool) -> Self {
        self.tls.relax_hostname = relax;
        self
    }

    #[must_use]
    pub fn with_min_tls_version(mut self, version: TlsVersion) -> Self {
        self.tls.min_tls_version = version;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if a timeout is zero or above one hour,
    /// or if the user agent is not a valid header value.
    pub fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_timeout(self.connect_timeout, "connect_timeout")?;
        ConfigValidator::validate_timeout(self.read_timeout, "read_timeout")?;
        ConfigValidator::validate_header_value(&self.user_agent, "user_agent")?;
        Ok(())
    }
}
