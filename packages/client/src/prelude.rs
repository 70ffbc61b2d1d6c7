//! Dockwire Prelude
//!
//! The types needed to configure a daemon client and send requests.

pub use crate::client::{DaemonClient, DaemonClientProvider, Response, TransportPolicy};
pub use crate::config::{DaemonConfig, TlsVersion, TransportConfig};
pub use crate::connect::{ConnectionSpec, DaemonEndpoint};
pub use crate::credentials::{CertDirCredentials, CredentialSupplier, Credentials, StaticCredentials};
pub use crate::error::{Error, Kind};
pub use crate::tls::{
    CredentialLoader, HostnameVerification, TlsError, TlsFailureKind, TransportContext,
    TransportContextBuilder, TrustPolicy,
};

pub use ::http::{HeaderMap, Method, StatusCode};
pub use url::Url;
