//! Credential loader
//!
//! Reads PEM files at call time and parses them. Nothing is cached: every
//! call re-reads the file, so a rotated certificate or key is seen by the
//! next build.

use std::path::Path;
use std::sync::Arc;

use rustls::crypto::CryptoProvider;

use super::certificate::{parse_certificate_from_pem, parse_private_key};
use super::errors::TlsError;
use super::provider;
use super::types::{ClientPrivateKey, ParsedCertificate, SecureKeyMaterial};

#[derive(Debug, Clone)]
pub struct CredentialLoader {
    provider: Arc<CryptoProvider>,
}

impl Default for CredentialLoader {
    fn default() -> Self {
        Self::new(provider::ensure_registered())
    }
}

impl CredentialLoader {
    /// Loader converting keys with `provider`.
    #[must_use]
    pub fn new(provider: Arc<CryptoProvider>) -> Self {
        Self { provider }
    }

    #[must_use]
    pub fn provider(&self) -> Arc<CryptoProvider> {
        Arc::clone(&self.provider)
    }

    /// Read the full contents of `path`.
    ///
    /// # Errors
    ///
    /// `TlsError::Configuration` for an empty path, `TlsError::FileOperation`
    /// when the file cannot be read.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<SecureKeyMaterial, TlsError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(TlsError::Configuration("empty PEM file path".to_string()));
        }

        std::fs::read(path)
            .map(SecureKeyMaterial::new)
            .map_err(|source| TlsError::FileOperation {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Read and parse the certificate at `path`.
    ///
    /// # Errors
    ///
    /// See [`CredentialLoader::load_file`]; malformed content fails with
    /// `TlsError::InvalidCertificate`.
    pub fn load_certificate(&self, path: impl AsRef<Path>) -> Result<ParsedCertificate, TlsError> {
        let pem = self.load_file(path)?;
        self.parse_certificate(pem.as_bytes())
    }

    /// Read and parse the private key at `path`.
    ///
    /// The file contents are zeroed once parsing finishes, on success and
    /// on failure.
    ///
    /// # Errors
    ///
    /// See [`CredentialLoader::load_file`]; malformed content fails with
    /// `TlsError::InvalidPrivateKey`.
    pub fn load_private_key(&self, path: impl AsRef<Path>) -> Result<ClientPrivateKey, TlsError> {
        let pem = self.load_file(path)?;
        self.parse_private_key(pem.as_bytes())
    }

    /// Parse PEM certificate text.
    ///
    /// # Errors
    ///
    /// `TlsError::InvalidCertificate` for anything but a PEM X.509 certificate.
    pub fn parse_certificate(&self, pem: &[u8]) -> Result<ParsedCertificate, TlsError> {
        parse_certificate_from_pem(pem)
    }

    /// Parse PEM key text with this loader's provider.
    ///
    /// # Errors
    ///
    /// `TlsError::InvalidPrivateKey` for malformed keys, non-key PEM sections
    /// and keys the provider cannot use.
    pub fn parse_private_key(&self, pem: &[u8]) -> Result<ClientPrivateKey, TlsError> {
        parse_private_key(pem, &self.provider)
    }
}
