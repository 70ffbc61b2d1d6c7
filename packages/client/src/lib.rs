//! # Dockwire Client
//!
//! Mutual-TLS transport for clients of a container-engine daemon. A client
//! certificate and private key are loaded from PEM files, held in a
//! single-entry key store, and presented to the daemon over a rustls
//! connection whose trust policy is fixed at construction.
//!
//! ## Features
//!
//! - **Credential reload per client**: every [`DaemonClientProvider::get`]
//!   re-reads the certificate and key, so rotation needs no restart
//! - **Trust selection**: one configured CA, trust-all, or the platform roots
//! - **PKCS#1, SEC1 and PKCS#8 keys**, zeroed from memory once parsed
//! - **Transport policy**: TLS 1.2+ by default, no redirects, 60s timeouts
//! - **Endpoints**: `unix://`, `tcp://`, `https://` and `http://`
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dockwire_client::prelude::*;
//!
//! # async fn run() -> dockwire_client::Result<()> {
//! let config = DaemonConfig::new("tcp://daemon.internal:2376".parse()?)
//!     .with_ca_cert_path("/etc/docker/certs/ca.pem");
//! let credentials: Arc<dyn CredentialSupplier> =
//!     Arc::new(CertDirCredentials::new("/etc/docker/certs"));
//!
//! let provider = DaemonClientProvider::new(config, Some(credentials))?;
//! let client = provider.get()?;
//! let pong = client.ping().await?;
//! assert_eq!(pong, "OK");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod connect;
pub mod credentials;
pub mod error;
pub mod tls;

pub mod prelude;

pub use crate::error::{Error, Result};
pub use crate::prelude::*;
