use http::StatusCode;

use super::helpers::TimedOut;
use super::types::{Error, Kind};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for a builder error.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for a request error.
pub fn request<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Request).with(e.into())
}

/// Creates an `Error` for a body error.
pub fn body<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Body).with(e.into())
}

/// Creates an `Error` for a decode error.
pub fn decode<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Decode).with(e.into())
}

/// Creates an `Error` for connection, socket and handshake failures.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Creates an `Error` for an elapsed connect or read timeout.
pub fn timeout() -> Error {
    Error::new(Kind::Timeout).with(TimedOut)
}

pub fn status_code(url: url::Url, status: StatusCode) -> Error {
    Error::new(Kind::Status(status)).with_url(url)
}
