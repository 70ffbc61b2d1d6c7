//! Basic timeout configuration methods
//!
//! Builder methods for the connect and read timeouts applied to every
//! daemon connection.

use std::time::Duration;

use super::DaemonConfig;

impl DaemonConfig {
    /// Set the connection timeout
    ///
    /// Bounds TCP/Unix socket establishment plus the TLS handshake.
    ///
    /// # Examples
    /// ```no_run
    /// use std::time::Duration;
    /// use dockwire_client::config::DaemonConfig;
    ///
    /// let config = DaemonConfig::default()
    ///     .with_connect_timeout(Duration::from_secs(5));
    /// assert_eq!(config.connect_timeout, Duration::from_secs(5));
    /// ```
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout
    ///
    /// Bounds the exchange from sending the request to the last response
    /// body byte. Local credential parsing is never subject to it.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}
