mod common;

use dockwire_client::config::TransportConfig;
use dockwire_client::tls::{
    CredentialLoader, HostnameVerification, TlsFailureKind, TrustPolicy,
};
use rustls::client::danger::ServerCertVerifier;
use rustls::pki_types::{ServerName, UnixTime};
use std::sync::Arc;

use common::{Authority, Identity, self_signed, write};

fn verify(
    verifier: &Arc<dyn ServerCertVerifier>,
    server: &Identity,
    name: &'static str,
) -> Result<(), rustls::Error> {
    let name = ServerName::try_from(name).unwrap();
    verifier
        .verify_server_cert(&server.cert_der, &[], &name, &[], UnixTime::now())
        .map(|_| ())
}

fn verifier_for(config: &TransportConfig, hostname: HostnameVerification) -> Arc<dyn ServerCertVerifier> {
    let loader = CredentialLoader::default();
    let policy = TrustPolicy::select(config, &loader).unwrap();
    policy.server_verifier(&loader.provider(), hostname).unwrap()
}

#[test]
fn ca_certificate_takes_priority_over_trust_all() {
    let dir = tempfile::tempdir().unwrap();
    let ca_path = Authority::new("Priority CA").write_to(dir.path());
    let config = TransportConfig::default()
        .with_ca_cert_path(&ca_path)
        .with_trust_all_certs(true);

    let policy = TrustPolicy::select(&config, &CredentialLoader::default()).unwrap();
    match policy {
        TrustPolicy::CaCertificate(ca) => assert!(ca.subject.contains("Priority CA")),
        other => panic!("unexpected policy {other:?}"),
    }
}

#[test]
fn trust_all_without_ca() {
    let config = TransportConfig::default().with_trust_all_certs(true);
    let policy = TrustPolicy::select(&config, &CredentialLoader::default()).unwrap();
    assert!(matches!(policy, TrustPolicy::AcceptAny));
}

#[test]
fn platform_default_otherwise() {
    let config = TransportConfig::default().with_ca_cert_path("");
    let policy = TrustPolicy::select(&config, &CredentialLoader::default()).unwrap();
    assert!(matches!(policy, TrustPolicy::PlatformDefault));
}

#[test]
fn unreadable_ca_fails_selection() {
    let dir = tempfile::tempdir().unwrap();
    let config = TransportConfig::default()
        .with_ca_cert_path(dir.path().join("missing-ca.pem"))
        .with_trust_all_certs(true);

    let err = TrustPolicy::select(&config, &CredentialLoader::default()).unwrap_err();
    assert_eq!(err.kind(), TlsFailureKind::Io);
}

#[test]
fn malformed_ca_is_trust_store_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "ca.pem", "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n");
    let config = TransportConfig::default().with_ca_cert_path(path);

    let err = TrustPolicy::select(&config, &CredentialLoader::default()).unwrap_err();
    assert_eq!(err.kind(), TlsFailureKind::TrustStore);
}

#[test]
fn ca_policy_accepts_only_its_own_servers() {
    let dir = tempfile::tempdir().unwrap();
    let authority = Authority::new("Daemon CA");
    let config = TransportConfig::default().with_ca_cert_path(authority.write_to(dir.path()));
    let verifier = verifier_for(&config, HostnameVerification::Strict);

    let trusted = authority.server("localhost");
    assert!(verify(&verifier, &trusted, "localhost").is_ok());

    let foreign = Authority::new("Other CA").server("localhost");
    assert!(verify(&verifier, &foreign, "localhost").is_err());

    let unsigned = self_signed("localhost");
    assert!(verify(&verifier, &unsigned, "localhost").is_err());
}

#[test]
fn platform_roots_reject_self_signed() {
    let verifier = verifier_for(&TransportConfig::default(), HostnameVerification::Strict);
    let unsigned = self_signed("localhost");
    assert!(verify(&verifier, &unsigned, "localhost").is_err());
}

#[test]
fn trust_all_accepts_anything() {
    let config = TransportConfig::default().with_trust_all_certs(true);
    let verifier = verifier_for(&config, HostnameVerification::Strict);

    let unsigned = self_signed("somewhere.example");
    assert!(verify(&verifier, &unsigned, "localhost").is_ok());
}

#[test]
fn relaxed_hostname_forgives_only_name_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let authority = Authority::new("Relaxed CA");
    let config = TransportConfig::default().with_ca_cert_path(authority.write_to(dir.path()));
    let server = authority.server("daemon.internal");

    let strict = verifier_for(&config, HostnameVerification::Strict);
    let err = verify(&strict, &server, "other.example").unwrap_err();
    assert!(matches!(err, rustls::Error::InvalidCertificate(_)));

    let relaxed = verifier_for(&config, HostnameVerification::Relaxed);
    assert!(verify(&relaxed, &server, "other.example").is_ok());
    assert!(verify(&relaxed, &server, "daemon.internal").is_ok());

    let foreign = Authority::new("Foreign CA").server("other.example");
    assert!(verify(&relaxed, &foreign, "other.example").is_err());
}
