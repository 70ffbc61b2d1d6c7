//! Daemon connector
//!
//! Opens a TCP or Unix-domain socket within the connect timeout and, for
//! TLS endpoints, runs the handshake with the client's transport context.

use std::fmt;

use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use super::{DaemonEndpoint, DaemonStream};
use crate::client::TransportPolicy;
use crate::error;
use crate::tls::TransportContext;

#[derive(Clone)]
pub struct DaemonConnector {
    policy: TransportPolicy,
    tls: Option<TlsConnector>,
}

impl fmt::Debug for DaemonConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaemonConnector")
            .field("policy", &self.policy)
            .field("tls", &self.tls.is_some())
            .finish()
    }
}

impl DaemonConnector {
    /// Connector for `policy`, using `context` for TLS endpoints.
    #[must_use]
    pub fn new(policy: TransportPolicy, context: Option<&TransportContext>) -> Self {
        Self {
            policy,
            tls: context.map(TransportContext::connector),
        }
    }

    #[must_use]
    pub fn policy(&self) -> &TransportPolicy {
        &self.policy
    }

    /// Connect to `endpoint`.
    ///
    /// # Errors
    ///
    /// - builder error when no connection spec allows the endpoint, or a TLS
    ///   endpoint is used without a transport context
    /// - timeout error when the connect timeout elapses
    /// - connect error for socket or handshake failures
    pub async fn connect(&self, endpoint: &DaemonEndpoint) -> error::Result<DaemonStream> {
        if self.policy.spec_for(endpoint).is_none() {
            return Err(error::builder(format!(
                "no connection spec allows endpoint {endpoint}"
            )));
        }

        tracing::debug!(%endpoint, "connecting to daemon");

        match tokio::time::timeout(self.policy.connect_timeout, self.open(endpoint)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(%endpoint, timeout = ?self.policy.connect_timeout, "daemon connect timed out");
                Err(error::timeout())
            }
        }
    }

    async fn open(&self, endpoint: &DaemonEndpoint) -> error::Result<DaemonStream> {
        match endpoint {
            #[cfg(unix)]
            DaemonEndpoint::Unix(path) => {
                let stream = tokio::net::UnixStream::connect(path)
                    .await
                    .map_err(error::connect)?;
                Ok(DaemonStream::Unix(stream))
            }
            #[cfg(not(unix))]
            DaemonEndpoint::Unix(_) => Err(error::builder(
                "unix socket endpoints are not supported on this platform",
            )),
            DaemonEndpoint::Tcp { host, port, tls } => {
                let stream = TcpStream::connect((host.as_str(), *port))
                    .await
                    .map_err(error::connect)?;
                stream.set_nodelay(true).map_err(error::connect)?;

                if !*tls {
                    return Ok(DaemonStream::Plain(stream));
                }

                let connector = self.tls.as_ref().ok_or_else(|| {
                    error::builder("TLS endpoint requires a transport context")
                })?;
                let server_name = ServerName::try_from(host.clone()).map_err(error::builder)?;
                let stream = connector
                    .connect(server_name, stream)
                    .await
                    .map_err(error::connect)?;

                let version = stream.get_ref().1.protocol_version();
                tracing::debug!(%endpoint, ?version, "TLS handshake with daemon completed");
                Ok(DaemonStream::Tls(Box::new(stream)))
            }
        }
    }
}
