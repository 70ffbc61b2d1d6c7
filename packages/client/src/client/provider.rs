//! Client provider
//!
//! Holds the daemon configuration and, for TLS endpoints, a transport
//! context builder. Every [`DaemonClientProvider::get`] builds a new
//! transport context from the current credentials and a new client around it.

use std::sync::Arc;

use super::DaemonClient;
use crate::config::DaemonConfig;
use crate::credentials::CredentialSupplier;
use crate::error;
use crate::tls::TransportContextBuilder;

#[derive(Debug)]
pub struct DaemonClientProvider {
    config: DaemonConfig,
    contexts: Option<TransportContextBuilder>,
}

impl DaemonClientProvider {
    /// Provider for `config`.
    ///
    /// `credentials` is required for TLS endpoints and ignored for cleartext
    /// ones.
    ///
    /// # Errors
    ///
    /// - builder error for an invalid configuration, or a TLS endpoint
    ///   without a credential supplier
    /// - TLS error when the trust policy cannot be set up
    pub fn new(
        config: DaemonConfig,
        credentials: Option<Arc<dyn CredentialSupplier>>,
    ) -> error::Result<Self> {
        config.validate().map_err(error::builder)?;

        let contexts = if config.endpoint.is_tls() {
            let credentials = credentials.ok_or_else(|| {
                error::builder(format!(
                    "TLS endpoint {} requires client credentials",
                    config.endpoint
                ))
            })?;
            Some(TransportContextBuilder::new(credentials, &config.tls)?)
        } else {
            if credentials.is_some() {
                tracing::debug!(endpoint = %config.endpoint, "cleartext endpoint; client credentials unused");
            }
            None
        };

        Ok(Self { config, contexts })
    }

    #[must_use]
    pub fn config(&self) -> &DaemonConfig {
        &self.config
    }

    #[must_use]
    pub fn context_builder(&self) -> Option<&TransportContextBuilder> {
        self.contexts.as_ref()
    }

    /// A new client with a freshly built transport context.
    ///
    /// Credentials are re-read from disk on every call; nothing is cached.
    ///
    /// # Errors
    ///
    /// TLS error when the credentials cannot be loaded or the context cannot
    /// be initialized.
    pub fn get(&self) -> error::Result<DaemonClient> {
        let context = self
            .contexts
            .as_ref()
            .map(TransportContextBuilder::build)
            .transpose()?;
        DaemonClient::new(&self.config, context)
    }
}
