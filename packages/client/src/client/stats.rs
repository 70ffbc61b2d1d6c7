//! Per-client request counters

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters shared by all clones of a [`DaemonClient`](super::DaemonClient).
#[derive(Debug)]
pub struct ClientStats {
    pub requests_total: AtomicU64,
    /// Responses with a status below 400
    pub requests_successful: AtomicU64,
    /// Responses with a 4xx/5xx status, plus requests that got no response
    pub requests_failed: AtomicU64,
    pub bytes_received: AtomicU64,
    pub connections_total: AtomicU64,
    pub connections_failed: AtomicU64,
    pub created_at: Instant,
}

impl Default for ClientStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            requests_successful: AtomicU64::new(0),
            requests_failed: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            connections_total: AtomicU64::new(0),
            connections_failed: AtomicU64::new(0),
            created_at: Instant::now(),
        }
    }

    pub(crate) fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_response(&self, success: bool, bytes: usize) {
        if success {
            self.requests_successful.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_failed.fetch_add(1, Ordering::Relaxed);
        }
        self.bytes_received.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_connection(&self, ok: bool) {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.connections_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    pub fn snapshot(&self) -> ClientStatsSnapshot {
        ClientStatsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_successful: self.requests_successful.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            connections_total: self.connections_total.load(Ordering::Relaxed),
            connections_failed: self.connections_failed.load(Ordering::Relaxed),
            age: self.age(),
        }
    }
}

/// Point-in-time copy of [`ClientStats`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientStatsSnapshot {
    pub requests_total: u64,
    pub requests_successful: u64,
    pub requests_failed: u64,
    pub bytes_received: u64,
    pub connections_total: u64,
    pub connections_failed: u64,
    pub age: Duration,
}
