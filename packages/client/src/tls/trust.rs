//! Trust policy selection
//!
//! Exactly one policy is active per transport context, chosen in priority
//! order when the context builder is constructed:
//!
//! 1. a configured CA certificate path: trust that one certificate
//! 2. `trust_all_certs`: accept any daemon certificate
//! 3. otherwise: the platform trust roots

use std::sync::Arc;

use rustls::client::WebPkiServerVerifier;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{CertificateError, DigitallySignedStruct, RootCertStore, SignatureScheme};

use super::errors::TlsError;
use super::loader::CredentialLoader;
use super::types::ParsedCertificate;
use crate::config::TransportConfig;

/// Label of the single entry in a CA-certificate trust store.
pub const CA_ENTRY_LABEL: &str = "ca";

/// Which daemon certificates are trusted.
#[derive(Debug, Clone)]
pub enum TrustPolicy {
    /// Only certificates issued by (or equal to) this CA certificate.
    CaCertificate(ParsedCertificate),
    /// Every certificate chain is accepted. Insecure.
    AcceptAny,
    /// The platform's native roots, with the bundled Mozilla roots as a
    /// fallback.
    PlatformDefault,
}

/// How the daemon's name is checked against its certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostnameVerification {
    #[default]
    Strict,
    /// Name mismatches are accepted; chain, validity and signatures are
    /// still verified.
    Relaxed,
}

impl HostnameVerification {
    #[must_use]
    pub fn from_relaxed(relaxed: bool) -> Self {
        if relaxed {
            HostnameVerification::Relaxed
        } else {
            HostnameVerification::Strict
        }
    }
}

impl TrustPolicy {
    /// Select the policy for `config`.
    ///
    /// # Errors
    ///
    /// A configured CA certificate that cannot be read or parsed fails the
    /// selection; there is no fallback to default trust.
    pub fn select(config: &TransportConfig, loader: &CredentialLoader) -> Result<Self, TlsError> {
        if let Some(path) = config.ca_cert_path() {
            let ca = loader.load_certificate(path).map_err(|e| match e {
                TlsError::InvalidCertificate(msg) => {
                    TlsError::TrustStore(format!("CA certificate {}: {msg}", path.display()))
                }
                other => other,
            })?;
            tracing::debug!(subject = %ca.subject, label = CA_ENTRY_LABEL, "trusting configured CA certificate");
            return Ok(TrustPolicy::CaCertificate(ca));
        }

        if config.trust_all_certs {
            tracing::warn!("daemon certificate verification disabled: trusting all certificates");
            return Ok(TrustPolicy::AcceptAny);
        }

        Ok(TrustPolicy::PlatformDefault)
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TrustPolicy::CaCertificate(_) => "ca-certificate",
            TrustPolicy::AcceptAny => "accept-any",
            TrustPolicy::PlatformDefault => "platform-default",
        }
    }

    /// Build the server certificate verifier for this policy.
    ///
    /// # Errors
    ///
    /// `TlsError::TrustStore` when the trust anchors cannot be assembled
    /// into a verifier.
    pub fn server_verifier(
        &self,
        provider: &Arc<CryptoProvider>,
        hostname: HostnameVerification,
    ) -> Result<Arc<dyn ServerCertVerifier>, TlsError> {
        let verifier: Arc<dyn ServerCertVerifier> = match self {
            TrustPolicy::CaCertificate(ca) => {
                let mut roots = RootCertStore::empty();
                roots
                    .add(ca.der().clone())
                    .map_err(|e| TlsError::TrustStore(format!("CA certificate rejected: {e}")))?;
                webpki_verifier(roots, provider)?
            }
            TrustPolicy::AcceptAny => {
                return Ok(Arc::new(AcceptAnyServerCert::new(Arc::clone(provider))));
            }
            TrustPolicy::PlatformDefault => webpki_verifier(platform_roots(), provider)?,
        };

        Ok(match hostname {
            HostnameVerification::Strict => verifier,
            HostnameVerification::Relaxed => {
                tracing::warn!("daemon hostname verification relaxed");
                Arc::new(RelaxedHostnameVerifier { inner: verifier })
            }
        })
    }
}

fn webpki_verifier(
    roots: RootCertStore,
    provider: &Arc<CryptoProvider>,
) -> Result<Arc<dyn ServerCertVerifier>, TlsError> {
    let verifier = WebPkiServerVerifier::builder_with_provider(Arc::new(roots), Arc::clone(provider))
        .build()
        .map_err(|e| TlsError::TrustStore(format!("failed to create verifier: {e}")))?;
    Ok(verifier)
}

/// Native roots, falling back to the bundled webpki roots when the platform
/// store is empty or partly unreadable.
fn platform_roots() -> RootCertStore {
    let mut root_store = RootCertStore::empty();

    let cert_result = rustls_native_certs::load_native_certs();
    let (added, ignored) = root_store.add_parsable_certificates(cert_result.certs);
    if ignored > 0 {
        tracing::warn!(ignored, "ignored unparsable platform root certificates");
    }

    for err in &cert_result.errors {
        tracing::warn!("platform certificate load error: {}", err);
    }

    if added == 0 || !cert_result.errors.is_empty() {
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    tracing::debug!("loaded {} platform root certificates", root_store.len());
    root_store
}

/// Accepts every server certificate; handshake signatures are still
/// checked with the provider's algorithms.
#[derive(Debug)]
pub struct AcceptAnyServerCert {
    provider: Arc<CryptoProvider>,
}

impl AcceptAnyServerCert {
    #[must_use]
    pub fn new(provider: Arc<CryptoProvider>) -> Self {
        Self { provider }
    }
}

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Wraps a verifier and forgives only certificate name mismatches.
#[derive(Debug)]
pub struct RelaxedHostnameVerifier {
    inner: Arc<dyn ServerCertVerifier>,
}

impl RelaxedHostnameVerifier {
    #[must_use]
    pub fn new(inner: Arc<dyn ServerCertVerifier>) -> Self {
        Self { inner }
    }
}

fn is_name_mismatch(err: &rustls::Error) -> bool {
    matches!(
        err,
        rustls::Error::InvalidCertificate(
            CertificateError::NotValidForName | CertificateError::NotValidForNameContext { .. }
        )
    )
}

impl ServerCertVerifier for RelaxedHostnameVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        match self
            .inner
            .verify_server_cert(end_entity, intermediates, server_name, ocsp_response, now)
        {
            Err(err) if is_name_mismatch(&err) => {
                tracing::warn!(?server_name, "accepting daemon certificate despite name mismatch");
                Ok(ServerCertVerified::assertion())
            }
            other => other,
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls12_signature(message, cert, dss)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls13_signature(message, cert, dss)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }

    fn requires_raw_public_keys(&self) -> bool {
        self.inner.requires_raw_public_keys()
    }
}
