//! TLS-specific error types for detailed error handling

use std::path::PathBuf;

/// Failure classes of the credential and transport-context pipeline.
///
/// Every class is terminal: nothing in this crate retries a build that
/// failed with one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsFailureKind {
    Configuration,
    InvalidCertificate,
    InvalidPrivateKey,
    TrustStore,
    ContextInit,
    Io,
}

/// TLS-specific error types for detailed error handling
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid certificate: {0}")]
    InvalidCertificate(String),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("trust store initialization failed: {0}")]
    TrustStore(String),
    #[error("transport context initialization failed: {0}")]
    ContextInit(String),
    #[error("failed to read {}: {source}", path.display())]
    FileOperation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TlsError {
    /// Classify this error into one of the fatal failure kinds.
    #[must_use]
    pub fn kind(&self) -> TlsFailureKind {
        match self {
            TlsError::Configuration(_) => TlsFailureKind::Configuration,
            TlsError::InvalidCertificate(_) => TlsFailureKind::InvalidCertificate,
            TlsError::InvalidPrivateKey(_) => TlsFailureKind::InvalidPrivateKey,
            TlsError::TrustStore(_) => TlsFailureKind::TrustStore,
            TlsError::ContextInit(_) => TlsFailureKind::ContextInit,
            TlsError::FileOperation { .. } => TlsFailureKind::Io,
        }
    }
}
