//! Trust and transport policy configuration for `DockwireBuilder`

use std::path::PathBuf;
use std::time::Duration;

use dockwire_client::config::TlsVersion;

use super::core::DockwireBuilder;

impl DockwireBuilder {
    /// Trust only this CA certificate. Takes priority over
    /// [`trust_all_certs`](DockwireBuilder::trust_all_certs).
    #[must_use]
    pub fn ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_ca_cert_path(path);
        self
    }

    /// Accept any daemon certificate when no CA certificate is set.
    #[must_use]
    pub fn trust_all_certs(mut self, trust_all: bool) -> Self {
        self.config = self.config.with_trust_all_certs(trust_all);
        self
    }

    /// Accept daemon certificates issued for a different host name.
    #[must_use]
    pub fn relax_hostname(mut self, relax: bool) -> Self {
        self.config = self.config.with_relax_hostname(relax);
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_connect_timeout(timeout);
        self
    }

    #[must_use]
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_read_timeout(timeout);
        self
    }

    #[must_use]
    pub fn min_tls_version(mut self, version: TlsVersion) -> Self {
        self.config = self.config.with_min_tls_version(version);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }
}
