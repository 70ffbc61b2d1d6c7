//! Core types for client identity material

use std::fmt;
use std::sync::Arc;

use rustls::SignatureAlgorithm;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::sign::SigningKey;
use zeroize::ZeroizeOnDrop;

/// Secure key material that zeroes on drop
#[derive(ZeroizeOnDrop)]
pub struct SecureKeyMaterial {
    data: Vec<u8>,
}

impl SecureKeyMaterial {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for SecureKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureKeyMaterial({} bytes)", self.data.len())
    }
}

/// PEM container a private key was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PemKeyFormat {
    /// `RSA PRIVATE KEY`
    Pkcs1,
    /// `EC PRIVATE KEY`
    Sec1,
    /// `PRIVATE KEY`
    Pkcs8,
}

/// Parsed X.509 client or CA certificate
#[derive(Debug, Clone)]
pub struct ParsedCertificate {
    pub(crate) der: CertificateDer<'static>,
    pub subject: String,
    pub issuer: String,
    pub serial: String,
    /// Validity window as Unix timestamps
    pub not_before: i64,
    pub not_after: i64,
    pub is_ca: bool,
}

impl ParsedCertificate {
    #[must_use]
    pub fn der(&self) -> &CertificateDer<'static> {
        &self.der
    }

    #[must_use]
    pub fn is_valid_at(&self, unix_time: i64) -> bool {
        self.not_before <= unix_time && unix_time <= self.not_after
    }
}

impl PartialEq for ParsedCertificate {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for ParsedCertificate {}

/// Parsed client private key, loaded into the crypto provider.
///
/// Never printed: `Debug` shows only the container format and algorithm.
pub struct ClientPrivateKey {
    pub(crate) der: PrivateKeyDer<'static>,
    pub(crate) format: PemKeyFormat,
    pub(crate) signing_key: Arc<dyn SigningKey>,
}

impl ClientPrivateKey {
    #[must_use]
    pub fn format(&self) -> PemKeyFormat {
        self.format
    }

    #[must_use]
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.signing_key.algorithm()
    }

    #[must_use]
    pub fn secret_der(&self) -> &[u8] {
        self.der.secret_der()
    }

    #[must_use]
    pub fn signing_key(&self) -> Arc<dyn SigningKey> {
        Arc::clone(&self.signing_key)
    }
}

impl Clone for ClientPrivateKey {
    fn clone(&self) -> Self {
        Self {
            der: self.der.clone_key(),
            format: self.format,
            signing_key: Arc::clone(&self.signing_key),
        }
    }
}

impl fmt::Debug for ClientPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientPrivateKey")
            .field("format", &self.format)
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}
