//! Connection specs
//!
//! A client carries exactly two: a modern-TLS spec whose version list starts
//! at the configured floor, and a cleartext spec for `http://` and `unix://`
//! daemons.

use rustls::SupportedProtocolVersion;

use super::DaemonEndpoint;
use crate::config::TlsVersion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionSpec {
    ModernTls { versions: Vec<TlsVersion> },
    Cleartext,
}

impl ConnectionSpec {
    /// TLS spec allowing `floor` and every newer version.
    #[must_use]
    pub fn modern_tls(floor: TlsVersion) -> Self {
        ConnectionSpec::ModernTls {
            versions: floor.and_newer(),
        }
    }

    #[must_use]
    pub fn cleartext() -> Self {
        ConnectionSpec::Cleartext
    }

    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(self, ConnectionSpec::ModernTls { .. })
    }

    /// Whether this spec can carry connections to `endpoint`.
    #[must_use]
    pub fn supports(&self, endpoint: &DaemonEndpoint) -> bool {
        self.is_tls() == endpoint.is_tls()
    }

    /// Protocol versions handed to rustls; empty for cleartext.
    #[must_use]
    pub fn rustls_versions(&self) -> Vec<&'static SupportedProtocolVersion> {
        match self {
            ConnectionSpec::ModernTls { versions } => {
                versions.iter().map(|v| v.rustls_version()).collect()
            }
            ConnectionSpec::Cleartext => Vec::new(),
        }
    }
}
