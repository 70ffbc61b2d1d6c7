//! Client identity configuration for `DockwireBuilder`

use std::path::PathBuf;
use std::sync::Arc;

use dockwire_client::credentials::{CertDirCredentials, CredentialSupplier, StaticCredentials};

use super::core::DockwireBuilder;

impl DockwireBuilder {
    /// Read `cert.pem` and `key.pem` from `dir` on every client build.
    #[must_use]
    pub fn cert_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.credentials = Some(Arc::new(CertDirCredentials::new(dir)));
        self
    }

    /// Client certificate and private key PEM file paths.
    #[must_use]
    pub fn identity(mut self, certificate: impl Into<String>, private_key: impl Into<String>) -> Self {
        self.credentials = Some(Arc::new(StaticCredentials::new(certificate, private_key)));
        self
    }

    /// Any credential supplier, asked again for every new client.
    #[must_use]
    pub fn credentials(mut self, supplier: Arc<dyn CredentialSupplier>) -> Self {
        self.credentials = Some(supplier);
        self
    }
}
