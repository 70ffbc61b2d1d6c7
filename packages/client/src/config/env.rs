//! Environment configuration
//!
//! Reads the container-engine client conventions `DOCKER_HOST`,
//! `DOCKER_CERT_PATH` and `DOCKER_TLS_VERIFY`.

use std::path::PathBuf;

use super::{ConfigResult, ConfigurationError, DaemonConfig};
use crate::connect::DaemonEndpoint;
use crate::credentials::CertDirCredentials;

pub const DOCKER_HOST: &str = "DOCKER_HOST";
pub const DOCKER_CERT_PATH: &str = "DOCKER_CERT_PATH";
pub const DOCKER_TLS_VERIFY: &str = "DOCKER_TLS_VERIFY";

/// File name of the CA certificate inside `DOCKER_CERT_PATH`.
pub const CA_CERT_FILE: &str = "ca.pem";

impl DaemonConfig {
    /// Build a configuration from the process environment.
    ///
    /// Returns the configuration plus a credential supplier for
    /// `DOCKER_CERT_PATH`, when one is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidEndpoint` if `DOCKER_HOST` cannot
    /// be parsed.
    pub fn from_env() -> ConfigResult<(Self, Option<CertDirCredentials>)> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DaemonConfig::from_env`] with an explicit variable lookup.
    ///
    /// - no `DOCKER_CERT_PATH`: a `tcp://` host is reached over cleartext HTTP
    /// - `DOCKER_CERT_PATH` with `DOCKER_TLS_VERIFY` set (and not `0`): mutual
    ///   TLS, verifying the daemon against `ca.pem` when that file exists and
    ///   against the platform roots otherwise
    /// - `DOCKER_CERT_PATH` without `DOCKER_TLS_VERIFY`: mutual TLS without
    ///   daemon verification
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidEndpoint` if `DOCKER_HOST` cannot
    /// be parsed.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<(Self, Option<CertDirCredentials>)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut endpoint = match non_empty(DOCKER_HOST) {
            Some(host) => host
                .parse::<DaemonEndpoint>()
                .map_err(|e| ConfigurationError::InvalidEndpoint(format!("{DOCKER_HOST}: {e}")))?,
            None => DaemonEndpoint::default(),
        };

        let cert_path = non_empty(DOCKER_CERT_PATH).map(PathBuf::from);
        let tls_verify = non_empty(DOCKER_TLS_VERIFY).is_some_and(|value| value.trim() != "0");

        let mut config = DaemonConfig::default();

        let credentials = match cert_path {
            Some(dir) => {
                if tls_verify {
                    let ca = dir.join(CA_CERT_FILE);
                    if ca.is_file() {
                        config.tls.ca_cert_path = Some(ca);
                    }
                } else {
                    tracing::warn!(
                        "{DOCKER_CERT_PATH} set without {DOCKER_TLS_VERIFY}; daemon certificate will not be verified"
                    );
                    config.tls.trust_all_certs = true;
                }
                Some(CertDirCredentials::new(dir))
            }
            None => {
                endpoint = endpoint.into_cleartext();
                None
            }
        };

        config.endpoint = endpoint;
        tracing::debug!(endpoint = %config.endpoint, tls = config.endpoint.is_tls(), "daemon configuration read from environment");
        Ok((config, credentials))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_socket() {
        let (config, credentials) = DaemonConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.endpoint, DaemonEndpoint::default());
        assert!(credentials.is_none());
    }

    #[test]
    fn tcp_host_without_certs_is_cleartext() {
        let (config, credentials) =
            DaemonConfig::from_lookup(lookup(&[(DOCKER_HOST, "tcp://10.0.0.5:2375")])).unwrap();
        assert!(!config.endpoint.is_tls());
        assert!(credentials.is_none());
    }

    #[test]
    fn cert_path_without_verify_trusts_all() {
        let (config, credentials) = DaemonConfig::from_lookup(lookup(&[
            (DOCKER_HOST, "tcp://10.0.0.5:2376"),
            (DOCKER_CERT_PATH, "/nonexistent/certs"),
        ]))
        .unwrap();
        assert!(config.endpoint.is_tls());
        assert!(config.tls.trust_all_certs);
        assert!(config.tls.ca_cert_path().is_none());
        assert!(credentials.is_some());
    }

    #[test]
    fn verify_zero_counts_as_unset() {
        let (config, _) = DaemonConfig::from_lookup(lookup(&[
            (DOCKER_HOST, "tcp://10.0.0.5:2376"),
            (DOCKER_CERT_PATH, "/nonexistent/certs"),
            (DOCKER_TLS_VERIFY, "0"),
        ]))
        .unwrap();
        assert!(config.tls.trust_all_certs);
    }

    #[test]
    fn invalid_host_rejected() {
        let result = DaemonConfig::from_lookup(lookup(&[(DOCKER_HOST, "ftp://daemon")]));
        assert!(matches!(result, Err(ConfigurationError::InvalidEndpoint(_))));
    }
}
