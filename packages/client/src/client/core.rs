//! Daemon HTTP client
//!
//! One HTTP/1.1 connection per request over the daemon stream. Responses are
//! buffered completely within the read timeout. Redirects are returned to the
//! caller unchanged.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{HOST, HeaderValue, USER_AGENT};
use http::{Method, Request};
use http_body_util::{BodyExt, Full};
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;

use super::policy::TransportPolicy;
use super::response::Response;
use super::stats::ClientStats;
use crate::config::DaemonConfig;
use crate::connect::{DaemonConnector, DaemonEndpoint};
use crate::error;
use crate::tls::TransportContext;

/// Client bound to one daemon endpoint, one transport policy and at most one
/// transport context. Cheap to clone; clones share statistics.
#[derive(Debug, Clone)]
pub struct DaemonClient {
    endpoint: DaemonEndpoint,
    user_agent: HeaderValue,
    connector: DaemonConnector,
    context: Option<TransportContext>,
    stats: Arc<ClientStats>,
}

impl DaemonClient {
    /// Client for `config`, presenting `context` on TLS endpoints.
    ///
    /// # Errors
    ///
    /// Builder error when the configured user agent is not a valid header
    /// value.
    pub fn new(config: &DaemonConfig, context: Option<TransportContext>) -> error::Result<Self> {
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(error::builder)?;
        let policy = TransportPolicy::from_config(config);
        let connector = DaemonConnector::new(policy, context.as_ref());

        Ok(Self {
            endpoint: config.endpoint.clone(),
            user_agent,
            connector,
            context,
            stats: Arc::new(ClientStats::new()),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &DaemonEndpoint {
        &self.endpoint
    }

    #[must_use]
    pub fn policy(&self) -> &TransportPolicy {
        self.connector.policy()
    }

    #[must_use]
    pub fn transport_context(&self) -> Option<&TransportContext> {
        self.context.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &ClientStats {
        &self.stats
    }

    /// `GET path_and_query`.
    ///
    /// # Errors
    ///
    /// See [`DaemonClient::send`].
    pub async fn get(&self, path_and_query: &str) -> error::Result<Response> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path_and_query)
            .body(Bytes::new())
            .map_err(error::builder)?;
        self.send(request).await
    }

    /// `GET path_and_query`, requiring a success status and a JSON body.
    ///
    /// # Errors
    ///
    /// Status error for 4xx/5xx responses, decode error for a body that is not
    /// valid JSON for `T`, and everything [`DaemonClient::send`] returns.
    pub async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> error::Result<T> {
        self.get(path_and_query).await?.error_for_status()?.json()
    }

    /// `GET /_ping`, the daemon liveness endpoint.
    ///
    /// # Errors
    ///
    /// See [`DaemonClient::get_json`].
    pub async fn ping(&self) -> error::Result<String> {
        self.get("/_ping").await?.error_for_status()?.text()
    }

    /// Send `request` to the daemon.
    ///
    /// Only the path and query of the request URI are used; `Host` and
    /// `User-Agent` are filled in when absent.
    ///
    /// # Errors
    ///
    /// - builder error for an unusable request or a disallowed endpoint
    /// - connect error for socket and TLS handshake failures
    /// - timeout error when the connect or read timeout elapses
    /// - request / body error for HTTP failures
    pub async fn send(&self, request: Request<Bytes>) -> error::Result<Response> {
        let (mut parts, body) = request.into_parts();
        let path_and_query = parts
            .uri
            .path_and_query()
            .map_or("/", http::uri::PathAndQuery::as_str)
            .to_string();
        let url = self.endpoint.request_url(&path_and_query)?;

        parts.uri = path_and_query.parse().map_err(error::builder)?;
        if !parts.headers.contains_key(HOST) {
            let host = HeaderValue::from_str(&self.endpoint.authority()).map_err(error::builder)?;
            parts.headers.insert(HOST, host);
        }
        if !parts.headers.contains_key(USER_AGENT) {
            parts.headers.insert(USER_AGENT, self.user_agent.clone());
        }
        let request = Request::from_parts(parts, Full::new(body));

        self.stats.record_request();
        tracing::debug!(method = %request.method(), %url, "sending daemon request");

        let stream = match self.connector.connect(&self.endpoint).await {
            Ok(stream) => {
                self.stats.record_connection(true);
                stream
            }
            Err(e) => {
                self.stats.record_connection(false);
                self.stats.record_failure();
                return Err(e.with_url(url));
            }
        };

        let read_timeout = self.policy().read_timeout;
        let exchange = async {
            let (mut sender, connection) =
                hyper::client::conn::http1::handshake(TokioIo::new(stream))
                    .await
                    .map_err(error::connect)?;
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    tracing::debug!("daemon connection closed with error: {}", e);
                }
            });

            let response = sender.send_request(request).await.map_err(error::request)?;
            let (head, body) = response.into_parts();
            let body = body.collect().await.map_err(error::body)?.to_bytes();
            Ok::<_, error::Error>((head, body))
        };

        let (head, body) = match tokio::time::timeout(read_timeout, exchange).await {
            Ok(Ok(exchanged)) => exchanged,
            Ok(Err(e)) => {
                self.stats.record_failure();
                return Err(e.with_url(url));
            }
            Err(_) => {
                self.stats.record_failure();
                tracing::debug!(%url, timeout = ?read_timeout, "daemon read timed out");
                return Err(error::timeout().with_url(url));
            }
        };

        let status = head.status;
        if status.is_redirection() {
            tracing::warn!(%url, %status, "daemon answered with a redirect; not following");
        }
        self.stats
            .record_response(!status.is_client_error() && !status.is_server_error(), body.len());
        tracing::debug!(%url, %status, bytes = body.len(), "daemon response received");

        Ok(Response::new(url, status, head.headers, body))
    }
}
