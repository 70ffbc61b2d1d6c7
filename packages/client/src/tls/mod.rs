//! Mutual-TLS transport setup
//!
//! Loads the client identity from PEM files, holds it in a single-entry key
//! store, selects how the daemon is trusted and assembles the rustls client
//! configuration used for every daemon connection.

pub(crate) mod certificate;
pub mod context;
pub mod errors;
pub mod key_store;
pub mod loader;
pub mod provider;
pub mod trust;
pub mod types;

pub use context::{TransportContext, TransportContextBuilder};
pub use errors::{TlsError, TlsFailureKind};
pub use key_store::{DEFAULT_ALIAS, KeyManager, SingleIdentityKeyStore};
pub use loader::CredentialLoader;
pub use provider::{ensure_registered, is_registered};
pub use trust::{AcceptAnyServerCert, HostnameVerification, RelaxedHostnameVerifier, TrustPolicy};
pub use types::{ClientPrivateKey, ParsedCertificate, PemKeyFormat, SecureKeyMaterial};
