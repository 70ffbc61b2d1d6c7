mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dockwire_client::config::TransportConfig;
use dockwire_client::credentials::{CertDirCredentials, CredentialSupplier, Credentials};
use dockwire_client::tls::{
    KeyManager, PemKeyFormat, TlsFailureKind, TransportContextBuilder, TrustPolicy,
};

use common::{Authority, fixture, self_signed};

fn builder(supplier: Arc<dyn CredentialSupplier>) -> TransportContextBuilder {
    let config = TransportConfig::default().with_trust_all_certs(true);
    TransportContextBuilder::new(supplier, &config).unwrap()
}

#[test]
fn builds_context_from_supplied_files() {
    let dir = tempfile::tempdir().unwrap();
    let identity = Authority::new("Context CA").client("context-client");
    let contexts = builder(identity.static_credentials(dir.path()));

    let context = contexts.build().unwrap();
    assert!(context.key_store().certificate().subject.contains("context-client"));
    assert_eq!(context.client_config().alpn_protocols, vec![b"http/1.1".to_vec()]);
    assert!(matches!(contexts.trust_policy(), TrustPolicy::AcceptAny));
}

#[test]
fn builds_context_from_key_pair_pem_formats() {
    let cases = [
        ("rsa_pkcs1_cert.pem", "rsa_pkcs1_key.pem", PemKeyFormat::Pkcs1, "pkcs1-client"),
        ("ec_sec1_cert.pem", "ec_sec1_key.pem", PemKeyFormat::Sec1, "sec1-client"),
        ("ec_sec1_cert.pem", "ec_params_key.pem", PemKeyFormat::Sec1, "sec1-client"),
    ];

    for (cert, key, format, subject) in cases {
        let (cert, key) = (fixture(cert), fixture(key));
        let contexts = builder(Arc::new(move || {
            Some(Credentials::new(
                cert.to_string_lossy(),
                key.to_string_lossy(),
            ))
        }));

        let context = contexts.build().unwrap();
        assert_eq!(context.key_store().private_key(None).format(), format);
        assert!(context.key_store().certificate().subject.contains(subject));
    }
}

#[test]
fn absent_credentials_fail_before_reading_files() {
    let contexts = builder(Arc::new(|| None::<Credentials>));
    let err = contexts.build().unwrap_err();
    assert_eq!(err.kind(), TlsFailureKind::Configuration);
}

#[test]
fn empty_paths_are_configuration_failures() {
    let contexts = builder(Arc::new(|| Some(Credentials::new("", "/tmp/key.pem"))));
    assert_eq!(contexts.build().unwrap_err().kind(), TlsFailureKind::Configuration);

    let contexts = builder(Arc::new(|| Some(Credentials::new("/tmp/cert.pem", " "))));
    assert_eq!(contexts.build().unwrap_err().kind(), TlsFailureKind::Configuration);
}

#[test]
fn missing_files_surface_as_io_failures() {
    let dir = tempfile::tempdir().unwrap();
    let contexts = builder(Arc::new(CertDirCredentials::new(dir.path())));
    assert_eq!(contexts.build().unwrap_err().kind(), TlsFailureKind::Io);
}

#[test]
fn every_build_asks_the_supplier_again() {
    let dir = tempfile::tempdir().unwrap();
    let identity = self_signed("counted");
    let (cert, key) = identity.write_to(dir.path());
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let contexts = builder(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Some(Credentials::new(
            cert.to_string_lossy(),
            key.to_string_lossy(),
        ))
    }));

    for _ in 0..3 {
        contexts.build().unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn rotated_files_are_picked_up_by_the_next_build() {
    let dir = tempfile::tempdir().unwrap();
    let authority = Authority::new("Rotation CA");
    authority.client("before-rotation").write_to(dir.path());
    let contexts = builder(Arc::new(CertDirCredentials::new(dir.path())));

    let first = contexts.build().unwrap();
    assert!(first.key_store().certificate().subject.contains("before-rotation"));

    authority.client("after-rotation").write_to(dir.path());
    let second = contexts.build().unwrap();
    assert!(second.key_store().certificate().subject.contains("after-rotation"));

    // Contexts already handed out keep the identity they were built with.
    assert!(first.key_store().certificate().subject.contains("before-rotation"));
}

#[test]
fn concurrent_builds_keep_their_own_identity() {
    let authority = Authority::new("Concurrent CA");
    let dirs: Vec<_> = (0..2).map(|_| tempfile::tempdir().unwrap()).collect();
    let names = ["tenant-a", "tenant-b"];
    let builders: Vec<_> = dirs
        .iter()
        .zip(names)
        .map(|(dir, name)| builder(authority.client(name).static_credentials(dir.path())))
        .collect();

    std::thread::scope(|scope| {
        for (contexts, name) in builders.iter().zip(names) {
            scope.spawn(move || {
                for _ in 0..20 {
                    let context = contexts.build().unwrap();
                    assert!(context.key_store().certificate().subject.contains(name));
                }
            });
        }
    });
}

#[test]
fn broken_ca_fails_builder_construction() {
    let dir = tempfile::tempdir().unwrap();
    let identity = self_signed("no-ca");
    let config = TransportConfig::default().with_ca_cert_path(dir.path().join("ca.pem"));

    let err = TransportContextBuilder::new(identity.static_credentials(dir.path()), &config)
        .unwrap_err();
    assert_eq!(err.kind(), TlsFailureKind::Io);
}

#[test]
fn malformed_certificate_aborts_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let identity = self_signed("garbled");
    identity.write_to(dir.path());
    common::write(dir.path(), "cert.pem", "\u{1}\u{2} random bytes, not PEM");

    let contexts = builder(Arc::new(CertDirCredentials::new(dir.path())));
    assert_eq!(contexts.build().unwrap_err().kind(), TlsFailureKind::InvalidCertificate);
}
