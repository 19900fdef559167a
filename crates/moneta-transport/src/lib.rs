//! TCP transport layer for the moneta currency service.
//!
//! Provides [`TcpTransport`] (the listener), [`TcpConnection`] (one
//! accepted peer), and [`FrameReader`] (newline framing over a chunked
//! byte stream).
//!
//! Every I/O failure is classified exactly once, at this boundary, into
//! a [`TransportError`] kind. Code above this crate matches on the kind
//! (`Closed`, `Timeout`, `Transient`, `Fatal`) and never inspects
//! `io::ErrorKind` itself.

mod error;
mod frame;
mod tcp;

pub use error::TransportError;
pub use frame::FrameReader;
pub use tcp::{ConnectionWriter, TcpConnection, TcpTransport};

use std::fmt;

/// Opaque identifier for a connection, used in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}
