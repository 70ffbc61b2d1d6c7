//! Single-entry key store
//!
//! A key manager holding exactly one client identity under the alias
//! [`DEFAULT_ALIAS`]. Alias selection ignores the requested key types and
//! acceptable issuers, and every alias lookup maps to the sole identity.

use std::fmt;
use std::sync::Arc;

use rustls::SignatureScheme;
use rustls::client::ResolvesClientCert;
use rustls::pki_types::CertificateDer;
use rustls::sign::CertifiedKey;

use super::types::{ClientPrivateKey, ParsedCertificate};

/// The only alias a [`SingleIdentityKeyStore`] knows.
pub const DEFAULT_ALIAS: &str = "docker";

/// Key-manager operations needed to present a client identity.
pub trait KeyManager: fmt::Debug + Send + Sync {
    fn choose_client_alias(&self, key_types: &[&str], issuers: &[&[u8]]) -> &str;

    fn choose_server_alias(&self, key_type: &str, issuers: &[&[u8]]) -> &str;

    fn certificate_chain(&self, alias: Option<&str>) -> &[CertificateDer<'static>];

    fn private_key(&self, alias: Option<&str>) -> &ClientPrivateKey;

    fn client_aliases(&self, key_type: &str, issuers: &[&[u8]]) -> Vec<&str>;

    fn server_aliases(&self, key_type: &str, issuers: &[&[u8]]) -> Vec<&str>;
}

pub struct SingleIdentityKeyStore {
    certificate: ParsedCertificate,
    chain: Vec<CertificateDer<'static>>,
    private_key: ClientPrivateKey,
    certified: Arc<CertifiedKey>,
}

impl SingleIdentityKeyStore {
    /// Store `certificate` and `private_key` under [`DEFAULT_ALIAS`].
    ///
    /// The chain is the certificate alone; no intermediates are assembled.
    #[must_use]
    pub fn new(certificate: ParsedCertificate, private_key: ClientPrivateKey) -> Self {
        let chain = vec![certificate.der().clone()];
        let certified = Arc::new(CertifiedKey::new(chain.clone(), private_key.signing_key()));
        Self {
            certificate,
            chain,
            private_key,
            certified,
        }
    }

    #[must_use]
    pub fn certificate(&self) -> &ParsedCertificate {
        &self.certificate
    }
}

impl fmt::Debug for SingleIdentityKeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleIdentityKeyStore")
            .field("alias", &DEFAULT_ALIAS)
            .field("subject", &self.certificate.subject)
            .field("private_key", &self.private_key)
            .finish()
    }
}

impl KeyManager for SingleIdentityKeyStore {
    fn choose_client_alias(&self, _key_types: &[&str], _issuers: &[&[u8]]) -> &str {
        DEFAULT_ALIAS
    }

    fn choose_server_alias(&self, _key_type: &str, _issuers: &[&[u8]]) -> &str {
        DEFAULT_ALIAS
    }

    fn certificate_chain(&self, _alias: Option<&str>) -> &[CertificateDer<'static>] {
        &self.chain
    }

    fn private_key(&self, _alias: Option<&str>) -> &ClientPrivateKey {
        &self.private_key
    }

    fn client_aliases(&self, _key_type: &str, _issuers: &[&[u8]]) -> Vec<&str> {
        vec![DEFAULT_ALIAS]
    }

    fn server_aliases(&self, _key_type: &str, _issuers: &[&[u8]]) -> Vec<&str> {
        vec![DEFAULT_ALIAS]
    }
}

impl ResolvesClientCert for SingleIdentityKeyStore {
    fn resolve(
        &self,
        root_hint_subjects: &[&[u8]],
        _sigschemes: &[SignatureScheme],
    ) -> Option<Arc<CertifiedKey>> {
        let alias = self.choose_client_alias(&[], root_hint_subjects);
        tracing::debug!(alias, subject = %self.certificate.subject, "presenting client certificate");
        Some(Arc::clone(&self.certified))
    }

    fn has_certs(&self) -> bool {
        true
    }
}
