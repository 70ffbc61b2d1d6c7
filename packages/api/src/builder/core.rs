//! Core `DockwireBuilder` structure and build step

use std::sync::Arc;

use dockwire_client::config::DaemonConfig;
use dockwire_client::connect::DaemonEndpoint;
use dockwire_client::credentials::CredentialSupplier;
use dockwire_client::{DaemonClient, DaemonClientProvider, Result};

/// Fluent builder for a [`DaemonClientProvider`].
///
/// Starts from [`DaemonConfig::default`]: the local Unix socket, 60 second
/// timeouts, TLS 1.2 as the minimum version and strict hostname checks.
#[derive(Clone)]
pub struct DockwireBuilder {
    pub(crate) config: DaemonConfig,
    /// Unparsed endpoint, checked in [`DockwireBuilder::build`]
    pub(crate) endpoint: Option<String>,
    pub(crate) credentials: Option<Arc<dyn CredentialSupplier>>,
    pub(crate) debug_enabled: bool,
}

impl Default for DockwireBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DockwireBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockwireBuilder")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials.is_some())
            .finish()
    }
}

impl DockwireBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DaemonConfig::default())
    }

    /// Continue from an existing configuration.
    #[must_use]
    pub fn with_config(config: DaemonConfig) -> Self {
        Self {
            config,
            endpoint: None,
            credentials: None,
            debug_enabled: false,
        }
    }

    /// Daemon endpoint, e.g. `tcp://10.0.0.5:2376` or `unix:///var/run/docker.sock`.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Log the resolved configuration when building.
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// Build the provider.
    ///
    /// # Errors
    ///
    /// - builder error for an unparseable endpoint, an invalid configuration,
    ///   or a TLS endpoint without credentials
    /// - TLS error when the configured CA certificate cannot be loaded
    pub fn build(self) -> Result<DaemonClientProvider> {
        let mut config = self.config;
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint.parse::<DaemonEndpoint>()?;
        }

        if self.debug_enabled {
            tracing::debug!(
                endpoint = %config.endpoint,
                connect_timeout = ?config.connect_timeout,
                read_timeout = ?config.read_timeout,
                tls = ?config.tls,
                credentials = self.credentials.is_some(),
                "building daemon client provider"
            );
        }

        DaemonClientProvider::new(config, self.credentials)
    }

    /// Build the provider and a first client from it.
    ///
    /// # Errors
    ///
    /// See [`DockwireBuilder::build`] and [`DaemonClientProvider::get`].
    pub fn connect(self) -> Result<DaemonClient> {
        self.build()?.get()
    }
}
