//! Buffered daemon response

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error;

/// A daemon response with its body fully read.
#[derive(Debug, Clone)]
pub struct Response {
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    pub(crate) fn new(url: Url, status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            url,
            status,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// `Location` of a redirect response. Redirects are never followed.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        if !self.status.is_redirection() {
            return None;
        }
        self.headers
            .get(http::header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8.
    ///
    /// # Errors
    ///
    /// Decode error when the body is not valid UTF-8.
    pub fn text(&self) -> error::Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| error::decode(e).with_url(self.url.clone()))
    }

    /// Body deserialized from JSON.
    ///
    /// # Errors
    ///
    /// Decode error when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> error::Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| error::decode(e).with_url(self.url.clone()))
    }

    /// Turn a 4xx or 5xx response into an error.
    ///
    /// # Errors
    ///
    /// Status error carrying the response status and URL.
    pub fn error_for_status(self) -> error::Result<Self> {
        if self.status.is_client_error() || self.status.is_server_error() {
            Err(error::status_code(self.url, self.status))
        } else {
            Ok(self)
        }
    }
}
