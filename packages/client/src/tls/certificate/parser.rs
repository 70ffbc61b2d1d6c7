//! X.509 certificate parsing

use std::time::{SystemTime, UNIX_EPOCH};

use rustls::pki_types::CertificateDer;
use x509_parser::prelude::*;

use crate::tls::errors::TlsError;
use crate::tls::types::ParsedCertificate;

/// Parse the first certificate of a PEM document.
///
/// Anything that is not a PEM-wrapped X.509 certificate fails with
/// [`TlsError::InvalidCertificate`].
pub fn parse_certificate_from_pem(pem: &[u8]) -> Result<ParsedCertificate, TlsError> {
    let mut reader = pem;
    let der = rustls_pemfile::certs(&mut reader)
        .next()
        .ok_or_else(|| TlsError::InvalidCertificate("no PEM certificate found".to_string()))?
        .map_err(|e| TlsError::InvalidCertificate(format!("failed to read PEM: {e}")))?;

    parse_certificate_from_der(der)
}

/// Parse a DER-encoded certificate.
pub fn parse_certificate_from_der(
    der: CertificateDer<'static>,
) -> Result<ParsedCertificate, TlsError> {
    let (subject, issuer, serial, not_before, not_after, is_ca) = {
        let (_, cert) = X509Certificate::from_der(der.as_ref())
            .map_err(|e| TlsError::InvalidCertificate(format!("X.509 parsing failed: {e}")))?;

        let validity = cert.validity();
        (
            cert.subject().to_string(),
            cert.issuer().to_string(),
            cert.raw_serial_as_string(),
            validity.not_before.timestamp(),
            validity.not_after.timestamp(),
            cert.is_ca(),
        )
    };

    let parsed = ParsedCertificate {
        der,
        subject,
        issuer,
        serial,
        not_before,
        not_after,
        is_ca,
    };

    if !parsed.is_valid_at(unix_now()) {
        tracing::warn!(
            subject = %parsed.subject,
            not_after = parsed.not_after,
            "certificate is outside its validity window"
        );
    }

    Ok(parsed)
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
