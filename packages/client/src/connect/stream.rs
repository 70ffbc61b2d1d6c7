//! Connected daemon stream

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
#[cfg(unix)]
use tokio::net::UnixStream;
use tokio_rustls::client::TlsStream;

/// A byte stream to the daemon, in whichever transport the endpoint needs.
#[derive(Debug)]
pub enum DaemonStream {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl DaemonStream {
    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(self, DaemonStream::Tls(_))
    }

    /// Negotiated TLS version, for TLS streams.
    #[must_use]
    pub fn protocol_version(&self) -> Option<rustls::ProtocolVersion> {
        match self {
            DaemonStream::Tls(stream) => stream.get_ref().1.protocol_version(),
            _ => None,
        }
    }
}

impl AsyncRead for DaemonStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            DaemonStream::Plain(stream) => Pin::new(stream).poll_read(cx, buf),
            DaemonStream::Tls(stream) => Pin::new(stream.as_mut()).poll_read(cx, buf),
            #[cfg(unix)]
            DaemonStream::Unix(stream) => Pin::new(stream).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for DaemonStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            DaemonStream::Plain(stream) => Pin::new(stream).poll_write(cx, buf),
            DaemonStream::Tls(stream) => Pin::new(stream.as_mut()).poll_write(cx, buf),
            #[cfg(unix)]
            DaemonStream::Unix(stream) => Pin::new(stream).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            DaemonStream::Plain(stream) => Pin::new(stream).poll_flush(cx),
            DaemonStream::Tls(stream) => Pin::new(stream.as_mut()).poll_flush(cx),
            #[cfg(unix)]
            DaemonStream::Unix(stream) => Pin::new(stream).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            DaemonStream::Plain(stream) => Pin::new(stream).poll_shutdown(cx),
            DaemonStream::Tls(stream) => Pin::new(stream.as_mut()).poll_shutdown(cx),
            #[cfg(unix)]
            DaemonStream::Unix(stream) => Pin::new(stream).poll_shutdown(cx),
        }
    }
}
