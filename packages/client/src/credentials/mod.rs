//! Client identity suppliers
//!
//! A [`CredentialSupplier`] yields the current client identity (certificate
//! PEM file) and credential (private key PEM file). It is asked again on
//! every transport-context build, so credentials rotated on disk are picked
//! up by the next client without a restart.

use std::fmt;
use std::path::{Path, PathBuf};

/// File name of the client certificate inside a certificate directory.
pub const CERT_FILE: &str = "cert.pem";

/// File name of the client private key inside a certificate directory.
pub const KEY_FILE: &str = "key.pem";

/// Paths of the client certificate (`identity`) and private key
/// (`credential`).
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identity: String,
    pub credential: String,
}

impl Credentials {
    pub fn new(identity: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            credential: credential.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// Source of the current client credentials.
///
/// Returning `None` is a precondition failure: the context build aborts
/// before any file is read.
pub trait CredentialSupplier: Send + Sync {
    fn credentials(&self) -> Option<Credentials>;
}

impl<F> CredentialSupplier for F
where
    F: Fn() -> Option<Credentials> + Send + Sync,
{
    fn credentials(&self) -> Option<Credentials> {
        self()
    }
}

/// Always supplies the same pair of paths.
#[derive(Debug, Clone)]
pub struct StaticCredentials(Credentials);

impl StaticCredentials {
    pub fn new(identity: impl Into<String>, credential: impl Into<String>) -> Self {
        Self(Credentials::new(identity, credential))
    }
}

impl From<Credentials> for StaticCredentials {
    fn from(credentials: Credentials) -> Self {
        Self(credentials)
    }
}

impl CredentialSupplier for StaticCredentials {
    fn credentials(&self) -> Option<Credentials> {
        Some(self.0.clone())
    }
}

/// `cert.pem` and `key.pem` inside a directory, the layout of
/// `DOCKER_CERT_PATH`.
#[derive(Debug, Clone)]
pub struct CertDirCredentials {
    dir: PathBuf,
}

impl CertDirCredentials {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CredentialSupplier for CertDirCredentials {
    /// `None` when the directory path is not valid UTF-8.
    fn credentials(&self) -> Option<Credentials> {
        let cert = self.dir.join(CERT_FILE);
        let key = self.dir.join(KEY_FILE);
        match (cert.to_str(), key.to_str()) {
            (Some(cert), Some(key)) => Some(Credentials::new(cert, key)),
            _ => {
                tracing::warn!(dir = ?self.dir, "certificate directory is not valid UTF-8; skipping");
                None
            }
        }
    }
}
