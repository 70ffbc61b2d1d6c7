//! PEM private key parsing

use rustls::crypto::CryptoProvider;
use rustls::pki_types::PrivateKeyDer;
use rustls_pemfile::Item;

use crate::tls::errors::TlsError;
use crate::tls::types::{ClientPrivateKey, PemKeyFormat};

/// Parse the first key section of a PEM document and load it into
/// `provider`.
///
/// Accepts `RSA PRIVATE KEY`, `EC PRIVATE KEY` and `PRIVATE KEY` sections;
/// sections the PEM reader does not know (such as `EC PARAMETERS`) are
/// skipped. Any other first section is an error.
pub fn parse_private_key(
    pem: &[u8],
    provider: &CryptoProvider,
) -> Result<ClientPrivateKey, TlsError> {
    let mut reader = pem;
    let item = rustls_pemfile::read_one(&mut reader)
        .map_err(|e| TlsError::InvalidPrivateKey(format!("failed to read PEM: {e}")))?;

    let (der, format) = match item {
        Some(Item::Pkcs1Key(key)) => (PrivateKeyDer::Pkcs1(key), PemKeyFormat::Pkcs1),
        Some(Item::Sec1Key(key)) => (PrivateKeyDer::Sec1(key), PemKeyFormat::Sec1),
        Some(Item::Pkcs8Key(key)) => (PrivateKeyDer::Pkcs8(key), PemKeyFormat::Pkcs8),
        Some(Item::X509Certificate(_)) => {
            return Err(TlsError::InvalidPrivateKey(
                "expected a PEM key pair, found a certificate".to_string(),
            ));
        }
        Some(_) => {
            return Err(TlsError::InvalidPrivateKey(
                "expected a PEM key pair, found an unsupported PEM section".to_string(),
            ));
        }
        None => {
            return Err(TlsError::InvalidPrivateKey(
                "no PEM private key found".to_string(),
            ));
        }
    };

    let signing_key = provider
        .key_provider
        .load_private_key(der.clone_key())
        .map_err(|e| TlsError::InvalidPrivateKey(format!("key rejected by crypto provider: {e}")))?;

    Ok(ClientPrivateKey {
        der,
        format,
        signing_key,
    })
}
