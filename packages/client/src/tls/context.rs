//! Transport context construction
//!
//! A [`TransportContextBuilder`] fixes the trust policy and server verifier
//! when it is created and asks its credential supplier for the client
//! identity on every [`build`](TransportContextBuilder::build). Built
//! contexts are never cached.

use std::fmt;
use std::sync::Arc;

use rustls::client::ResolvesClientCert;
use rustls::client::danger::ServerCertVerifier;
use rustls::{ClientConfig, SupportedProtocolVersion};
use tokio_rustls::TlsConnector;

use super::errors::TlsError;
use super::key_store::SingleIdentityKeyStore;
use super::loader::CredentialLoader;
use super::trust::{HostnameVerification, TrustPolicy};
use crate::config::TransportConfig;
use crate::connect::ConnectionSpec;
use crate::credentials::CredentialSupplier;

/// ALPN protocol offered to the daemon.
const ALPN_HTTP11: &[u8] = b"http/1.1";

/// An initialized client TLS context: the rustls configuration plus the key
/// store it presents.
#[derive(Clone)]
pub struct TransportContext {
    config: Arc<ClientConfig>,
    key_store: Arc<SingleIdentityKeyStore>,
}

impl TransportContext {
    #[must_use]
    pub fn client_config(&self) -> Arc<ClientConfig> {
        Arc::clone(&self.config)
    }

    #[must_use]
    pub fn key_store(&self) -> &SingleIdentityKeyStore {
        &self.key_store
    }

    #[must_use]
    pub fn connector(&self) -> TlsConnector {
        TlsConnector::from(Arc::clone(&self.config))
    }
}

impl fmt::Debug for TransportContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportContext")
            .field("key_store", &self.key_store)
            .field("alpn", &self.config.alpn_protocols)
            .finish_non_exhaustive()
    }
}

pub struct TransportContextBuilder {
    credentials: Arc<dyn CredentialSupplier>,
    loader: CredentialLoader,
    trust: TrustPolicy,
    verifier: Arc<dyn ServerCertVerifier>,
    versions: Vec<&'static SupportedProtocolVersion>,
}

impl fmt::Debug for TransportContextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportContextBuilder")
            .field("trust", &self.trust.name())
            .field("versions", &self.versions)
            .finish_non_exhaustive()
    }
}

impl TransportContextBuilder {
    /// Builder using the process-wide crypto provider.
    ///
    /// # Errors
    ///
    /// Fails when the trust policy cannot be selected, e.g. a configured CA
    /// certificate is missing or malformed.
    pub fn new(
        credentials: Arc<dyn CredentialSupplier>,
        config: &TransportConfig,
    ) -> Result<Self, TlsError> {
        Self::with_loader(credentials, config, CredentialLoader::default())
    }

    /// Builder reading credentials through `loader`.
    ///
    /// # Errors
    ///
    /// See [`TransportContextBuilder::new`].
    pub fn with_loader(
        credentials: Arc<dyn CredentialSupplier>,
        config: &TransportConfig,
        loader: CredentialLoader,
    ) -> Result<Self, TlsError> {
        let trust = TrustPolicy::select(config, &loader)?;
        let hostname = HostnameVerification::from_relaxed(config.relax_hostname);
        let verifier = trust.server_verifier(&loader.provider(), hostname)?;
        let versions = ConnectionSpec::modern_tls(config.min_tls_version).rustls_versions();

        tracing::debug!(trust = trust.name(), ?hostname, "transport context builder ready");

        Ok(Self {
            credentials,
            loader,
            trust,
            verifier,
            versions,
        })
    }

    #[must_use]
    pub fn trust_policy(&self) -> &TrustPolicy {
        &self.trust
    }

    /// Build a fresh context from the supplier's current credentials.
    ///
    /// Certificate and key files are read again on every call.
    ///
    /// # Errors
    ///
    /// - `TlsError::Configuration` when the supplier returns no credentials
    ///   or an empty path
    /// - `TlsError::FileOperation` when a file cannot be read
    /// - `TlsError::InvalidCertificate` / `TlsError::InvalidPrivateKey` for
    ///   malformed PEM
    /// - `TlsError::ContextInit` when rustls rejects the configuration
    pub fn build(&self) -> Result<TransportContext, TlsError> {
        let credentials = self.credentials.credentials().ok_or_else(|| {
            TlsError::Configuration("credential supplier returned no credentials".to_string())
        })?;

        if credentials.identity.trim().is_empty() {
            return Err(TlsError::Configuration(
                "client certificate path is empty".to_string(),
            ));
        }
        if credentials.credential.trim().is_empty() {
            return Err(TlsError::Configuration(
                "client private key path is empty".to_string(),
            ));
        }

        let certificate = self.loader.load_certificate(&credentials.identity)?;
        let private_key = self.loader.load_private_key(&credentials.credential)?;
        tracing::debug!(
            subject = %certificate.subject,
            key_format = ?private_key.format(),
            "loaded client identity"
        );

        let key_store = Arc::new(SingleIdentityKeyStore::new(certificate, private_key));

        let mut config = ClientConfig::builder_with_provider(self.loader.provider())
            .with_protocol_versions(&self.versions)
            .map_err(|e| TlsError::ContextInit(format!("unsupported protocol versions: {e}")))?
            .dangerous()
            .with_custom_certificate_verifier(Arc::clone(&self.verifier))
            .with_client_cert_resolver(Arc::clone(&key_store) as Arc<dyn ResolvesClientCert>);
        config.alpn_protocols = vec![ALPN_HTTP11.to_vec()];

        Ok(TransportContext {
            config: Arc::new(config),
            key_store,
        })
    }
}
