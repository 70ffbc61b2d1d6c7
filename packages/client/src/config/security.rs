//! Security Configuration Module
//!
//! TLS version floor and trust settings consumed by the transport-context builder.

use std::path::{Path, PathBuf};

use rustls::SupportedProtocolVersion;

/// TLS version enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TlsVersion {
    #[default]
    Tls12,
    Tls13,
}

impl TlsVersion {
    /// Every version this crate can negotiate, newest first.
    pub const ALL: [TlsVersion; 2] = [TlsVersion::Tls13, TlsVersion::Tls12];

    #[must_use]
    pub fn rustls_version(self) -> &'static SupportedProtocolVersion {
        match self {
            TlsVersion::Tls12 => &rustls::version::TLS12,
            TlsVersion::Tls13 => &rustls::version::TLS13,
        }
    }

    /// Versions at or above `self`, newest first.
    #[must_use]
    pub fn and_newer(self) -> Vec<TlsVersion> {
        Self::ALL.into_iter().filter(|v| *v >= self).collect()
    }
}

/// Trust and identity settings for the daemon's encrypted socket.
///
/// These values are read once when a
/// [`TransportContextBuilder`](crate::tls::TransportContextBuilder) is
/// constructed. Client credentials are not part of this struct; they come
/// from a [`CredentialSupplier`](crate::credentials::CredentialSupplier) on
/// every build.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    pub ca_cert_path: Option<PathBuf>,
    pub trust_all_certs: bool,
    pub relax_hostname: bool,
    pub min_tls_version: TlsVersion,
}

impl TransportConfig {
    /// The configured CA certificate path, treating an empty path as absent.
    #[must_use]
    pub fn ca_cert_path(&self) -> Option<&Path> {
        self.ca_cert_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    #[must_use]
    pub fn with_ca_cert_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_trust_all_certs(mut self, trust_all: bool) -> Self {
        self.trust_all_certs = trust_all;
        self
    }

    #[must_use]
    pub fn with_relax_hostname(mut self, relax: bool) -> Self {
        self.relax_hostname = relax;
        self
    }

    #[must_use]
    pub fn with_min_tls_version(mut self, version: TlsVersion) -> Self {
        self.min_tls_version = version;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ca_path_is_absent() {
        let config = TransportConfig::default().with_ca_cert_path("");
        assert!(config.ca_cert_path().is_none());

        let config = TransportConfig::default().with_ca_cert_path("/etc/docker/ca.pem");
        assert_eq!(config.ca_cert_path(), Some(Path::new("/etc/docker/ca.pem")));
    }

    #[test]
    fn tls12_floor_offers_both_versions() {
        assert_eq!(
            TlsVersion::Tls12.and_newer(),
            vec![TlsVersion::Tls13, TlsVersion::Tls12]
        );
        assert_eq!(TlsVersion::Tls13.and_newer(), vec![TlsVersion::Tls13]);
    }
}
