//! Dockwire Public API
//!
//! Fluent construction of mutually authenticated clients for a
//! container-engine daemon.
//!
//! ```no_run
//! use dockwire::Dockwire;
//!
//! # async fn run() -> dockwire::Result<()> {
//! let provider = Dockwire::builder()
//!     .endpoint("tcp://daemon.internal:2376")
//!     .cert_path("/etc/docker/certs")
//!     .ca_cert("/etc/docker/certs/ca.pem")
//!     .build()?;
//!
//! let pong = provider.get()?.ping().await?;
//! assert_eq!(pong, "OK");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

pub use builder::*;

pub use dockwire_client::config::{DaemonConfig, TlsVersion};
pub use dockwire_client::credentials::{Credentials, CredentialSupplier};
pub use dockwire_client::{
    DaemonClient, DaemonClientProvider, DaemonEndpoint, Error, Response, Result,
};

/// Main Dockwire entry point providing static builder methods
pub struct Dockwire;

impl Dockwire {
    /// A builder starting from the default configuration.
    #[must_use]
    pub fn builder() -> DockwireBuilder {
        DockwireBuilder::new()
    }

    /// A builder configured from `DOCKER_HOST`, `DOCKER_CERT_PATH` and
    /// `DOCKER_TLS_VERIFY`.
    ///
    /// # Errors
    ///
    /// Builder error when `DOCKER_HOST` cannot be parsed.
    pub fn from_env() -> Result<DockwireBuilder> {
        let (config, credentials) =
            DaemonConfig::from_env().map_err(dockwire_client::error::builder)?;
        let builder = DockwireBuilder::with_config(config);
        Ok(match credentials {
            Some(supplier) => builder.cert_path(supplier.dir()),
            None => builder,
        })
    }
}

/// Shorthand for [`Dockwire::builder`]
#[must_use]
pub fn builder() -> DockwireBuilder {
    DockwireBuilder::new()
}
