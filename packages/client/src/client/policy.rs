//! Transport policy
//!
//! Fixed when a client is built: connect and read timeouts, redirects off,
//! exactly two connection specs (modern TLS from the configured floor, and
//! cleartext) and the hostname verification strategy.

use std::time::Duration;

use crate::config::DaemonConfig;
use crate::connect::{ConnectionSpec, DaemonEndpoint};
use crate::tls::HostnameVerification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportPolicy {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Always `false`; redirects from the daemon are returned as-is.
    pub follow_redirects: bool,
    pub connection_specs: Vec<ConnectionSpec>,
    pub hostname_verification: HostnameVerification,
}

impl TransportPolicy {
    #[must_use]
    pub fn from_config(config: &DaemonConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout,
            read_timeout: config.read_timeout,
            follow_redirects: false,
            connection_specs: vec![
                ConnectionSpec::modern_tls(config.tls.min_tls_version),
                ConnectionSpec::cleartext(),
            ],
            hostname_verification: HostnameVerification::from_relaxed(config.tls.relax_hostname),
        }
    }

    /// The first connection spec able to reach `endpoint`.
    #[must_use]
    pub fn spec_for(&self, endpoint: &DaemonEndpoint) -> Option<&ConnectionSpec> {
        self.connection_specs
            .iter()
            .find(|spec| spec.supports(endpoint))
    }
}

impl Default for TransportPolicy {
    fn default() -> Self {
        Self::from_config(&DaemonConfig::default())
    }
}
