//! Daemon endpoint addressing
//!
//! Accepted forms: `unix:///path/to.sock`, `tcp://host:port`,
//! `https://host:port` and `http://host:port`. `tcp` and `https` are reached
//! over TLS; `http` and `unix` over cleartext.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use crate::error::{self, BadScheme};

/// Default local daemon socket.
pub const DEFAULT_UNIX_SOCKET: &str = "/var/run/docker.sock";

/// Conventional daemon port for the encrypted socket.
pub const DEFAULT_TLS_PORT: u16 = 2376;

/// Conventional daemon port for the cleartext socket.
pub const DEFAULT_CLEARTEXT_PORT: u16 = 2375;

const UNIX_PREFIX: &str = "unix://";

/// Where the daemon listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaemonEndpoint {
    Unix(PathBuf),
    Tcp { host: String, port: u16, tls: bool },
}

impl Default for DaemonEndpoint {
    fn default() -> Self {
        DaemonEndpoint::Unix(PathBuf::from(DEFAULT_UNIX_SOCKET))
    }
}

impl DaemonEndpoint {
    /// Parse an endpoint string.
    ///
    /// # Errors
    ///
    /// Returns a builder error for unparseable input, unsupported schemes,
    /// a TCP endpoint without a host, or a Unix endpoint without a path.
    pub fn parse(input: &str) -> error::Result<Self> {
        let input = input.trim();

        // Socket paths are taken verbatim: no host segment, no percent-decoding.
        if let Some(path) = input.strip_prefix(UNIX_PREFIX) {
            if path.is_empty() || path == "/" {
                return Err(error::builder("unix endpoint is missing a socket path"));
            }
            return Ok(DaemonEndpoint::Unix(PathBuf::from(path)));
        }

        let url = Url::parse(input).map_err(error::builder)?;

        let tls = match url.scheme() {
            "unix" => return Err(error::builder("unix endpoint must start with unix://")),
            "tcp" | "https" => true,
            "http" => false,
            other => return Err(error::builder(BadScheme(other.to_string()))),
        };

        let host = match url.host() {
            Some(url::Host::Domain(domain)) => domain.to_string(),
            Some(url::Host::Ipv4(addr)) => addr.to_string(),
            Some(url::Host::Ipv6(addr)) => addr.to_string(),
            None => return Err(error::builder("tcp endpoint is missing a host")),
        };

        let port = url.port().unwrap_or(if tls {
            DEFAULT_TLS_PORT
        } else {
            DEFAULT_CLEARTEXT_PORT
        });

        Ok(DaemonEndpoint::Tcp { host, port, tls })
    }

    /// Whether connections to this endpoint use the TLS connection spec.
    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(self, DaemonEndpoint::Tcp { tls: true, .. })
    }

    /// The same endpoint reached over cleartext.
    #[must_use]
    pub fn into_cleartext(self) -> Self {
        match self {
            DaemonEndpoint::Tcp { host, port, .. } => DaemonEndpoint::Tcp {
                host,
                port,
                tls: false,
            },
            unix => unix,
        }
    }

    /// Value of the `Host` header sent to the daemon.
    #[must_use]
    pub fn authority(&self) -> String {
        match self {
            DaemonEndpoint::Unix(_) => "localhost".to_string(),
            DaemonEndpoint::Tcp { host, port, .. } if host.contains(':') => {
                format!("[{host}]:{port}")
            }
            DaemonEndpoint::Tcp { host, port, .. } => format!("{host}:{port}"),
        }
    }

    /// Absolute URL for `path_and_query`, used for error context and
    /// responses. Unix endpoints are rendered as `http://localhost`.
    ///
    /// # Errors
    ///
    /// Returns a builder error if `path_and_query` is not a valid URL path.
    pub fn request_url(&self, path_and_query: &str) -> error::Result<Url> {
        let scheme = if self.is_tls() { "https" } else { "http" };
        let base = format!("{scheme}://{}", self.authority());
        Url::parse(&base)
            .and_then(|base| base.join(path_and_query))
            .map_err(error::builder)
    }
}

impl FromStr for DaemonEndpoint {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DaemonEndpoint::parse(s)
    }
}

impl fmt::Display for DaemonEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaemonEndpoint::Unix(path) => write!(f, "unix://{}", path.display()),
            DaemonEndpoint::Tcp { tls: true, .. } => write!(f, "tcp://{}", self.authority()),
            DaemonEndpoint::Tcp { tls: false, .. } => write!(f, "http://{}", self.authority()),
        }
    }
}
