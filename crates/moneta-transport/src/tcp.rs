//! TCP listener and connection types.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::AsyncWriteExt;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

use crate::{ConnectionId, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// A TCP listener that accepts [`TcpConnection`]s.
pub struct TcpTransport {
    listener: TcpListener,
}

impl TcpTransport {
    /// Binds a listener to the given address.
    ///
    /// Bind failure is fatal: a service that cannot listen has nothing
    /// to do, so the error propagates all the way to `main`.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::Fatal)?;
        tracing::info!(addr, "listening");
        Ok(Self { listener })
    }

    /// Returns the local address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Waits for and accepts the next incoming connection.
    ///
    /// Accept failures come back classified; the caller decides whether
    /// to back off ([`TransportError::is_transient`]) or just log and
    /// keep accepting. A failed accept never yields a handle, so there
    /// is nothing to close here.
    pub async fn accept(&mut self) -> Result<TcpConnection, TransportError> {
        let (stream, peer) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::from_io)?;

        let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, %peer, "accepted connection");

        Ok(TcpConnection { id, peer, stream })
    }
}

/// A single accepted TCP connection.
///
/// The stream is closed when both halves produced by
/// [`into_split`](Self::into_split) are dropped, so teardown happens on
/// every exit path of a session task, panics included.
pub struct TcpConnection {
    id: ConnectionId,
    peer: SocketAddr,
    stream: TcpStream,
}

impl TcpConnection {
    /// Returns the unique identifier for this connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Returns the peer address.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Splits the connection into a raw read half and a classified
    /// writer.
    ///
    /// The read half feeds a `FrameReader` or a JSON value reader; the
    /// session loop is strictly request/response, so the two halves are
    /// never used concurrently.
    pub fn into_split(self) -> (OwnedReadHalf, ConnectionWriter) {
        let (read, write) = self.stream.into_split();
        (read, ConnectionWriter { inner: write })
    }
}

/// Write half of a [`TcpConnection`], with classified errors.
pub struct ConnectionWriter {
    inner: OwnedWriteHalf,
}

impl ConnectionWriter {
    /// Writes the whole buffer to the peer.
    pub async fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.inner
            .write_all(data)
            .await
            .map_err(TransportError::from_io)
    }
}
