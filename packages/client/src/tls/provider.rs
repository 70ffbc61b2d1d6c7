//! Process-wide crypto provider registration
//!
//! rustls keeps one default [`CryptoProvider`] per process, and installing a
//! second one fails. [`ensure_registered`] installs `ring` once and is safe to
//! call from any number of threads, any number of times.

use std::sync::{Arc, Once};

use rustls::crypto::CryptoProvider;

static REGISTER: Once = Once::new();

/// Install the `ring` provider as the process default unless one is already
/// installed, and return the active default.
///
/// A provider installed earlier by the application (or concurrently by
/// another thread) is kept as-is.
pub fn ensure_registered() -> Arc<CryptoProvider> {
    REGISTER.call_once(|| {
        if CryptoProvider::get_default().is_some() {
            tracing::debug!("rustls crypto provider already installed");
            return;
        }
        match rustls::crypto::ring::default_provider().install_default() {
            Ok(()) => tracing::debug!("installed ring as the rustls crypto provider"),
            Err(_) => tracing::debug!("rustls crypto provider installed concurrently"),
        }
    });

    match CryptoProvider::get_default() {
        Some(provider) => Arc::clone(provider),
        None => Arc::new(rustls::crypto::ring::default_provider()),
    }
}

/// Whether a process-wide provider is installed.
#[must_use]
pub fn is_registered() -> bool {
    CryptoProvider::get_default().is_some()
}
