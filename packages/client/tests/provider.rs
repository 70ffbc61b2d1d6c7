use std::sync::Arc;

use dockwire_client::tls::{ensure_registered, is_registered};

#[test]
fn registration_is_idempotent() {
    let first = ensure_registered();
    let second = ensure_registered();

    assert!(is_registered());
    assert!(Arc::ptr_eq(&first, &second));

    // A second process-wide install is refused by rustls; the registered
    // provider stays in place.
    assert!(rustls::crypto::ring::default_provider().install_default().is_err());
    assert!(Arc::ptr_eq(&first, &ensure_registered()));
}

#[test]
fn concurrent_registration_agrees() {
    let providers: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(ensure_registered)).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for provider in &providers {
        assert!(Arc::ptr_eq(provider, &providers[0]));
    }
}
