//! Error taxonomy for the transport layer.

use std::io;

/// Errors that can occur on the transport layer, classified by kind.
///
/// The four variants are the whole error vocabulary of the service:
///
/// - [`Closed`](Self::Closed) — the peer went away cleanly (EOF, reset,
///   broken pipe). Sessions treat this as a normal, silent teardown.
/// - [`Timeout`](Self::Timeout) — a read deadline elapsed. Also a
///   silent teardown; distinct from `Closed` only for logging.
/// - [`Transient`](Self::Transient) — a failure worth retrying, e.g. an
///   interrupted syscall or an aborted handshake during accept. The
///   listener backs off and tries again.
/// - [`Fatal`](Self::Fatal) — everything else; the operation cannot
///   meaningfully be retried.
///
/// Classification happens once, in [`TransportError::from_io`];
/// everything above this crate matches on these variants instead of
/// inspecting `io::ErrorKind` at each call site.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The peer closed the connection.
    #[error("connection closed by peer")]
    Closed,

    /// A read deadline elapsed before a complete request arrived.
    #[error("read deadline elapsed")]
    Timeout,

    /// A retryable I/O failure.
    #[error("transient i/o failure: {0}")]
    Transient(#[source] io::Error),

    /// An unrecoverable I/O failure.
    #[error("i/o failure: {0}")]
    Fatal(#[source] io::Error),
}

impl TransportError {
    /// Classifies a raw I/O error into a transport error kind.
    ///
    /// This is the single decision point for the whole crate: reads,
    /// writes, and accepts all map their `io::Error` through here.
    pub fn from_io(err: io::Error) -> Self {
        use io::ErrorKind::*;
        match err.kind() {
            UnexpectedEof | ConnectionReset | ConnectionAborted | BrokenPipe => Self::Closed,
            WouldBlock | TimedOut => Self::Timeout,
            Interrupted => Self::Transient(err),
            _ => Self::Fatal(err),
        }
    }

    /// Returns `true` for errors the caller should retry with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    /// Returns `true` for conditions that end a session silently
    /// (clean disconnect or deadline expiry).
    pub fn is_session_end(&self) -> bool {
        matches!(self, Self::Closed | Self::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io(kind: io::ErrorKind) -> io::Error {
        io::Error::new(kind, "test")
    }

    #[test]
    fn test_peer_gone_kinds_classify_as_closed() {
        for kind in [
            io::ErrorKind::UnexpectedEof,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::ConnectionAborted,
            io::ErrorKind::BrokenPipe,
        ] {
            let err = TransportError::from_io(io(kind));
            assert!(matches!(err, TransportError::Closed), "{kind:?}");
            assert!(err.is_session_end());
        }
    }

    #[test]
    fn test_timeout_kinds_classify_as_timeout() {
        for kind in [io::ErrorKind::WouldBlock, io::ErrorKind::TimedOut] {
            let err = TransportError::from_io(io(kind));
            assert!(matches!(err, TransportError::Timeout), "{kind:?}");
            assert!(err.is_session_end());
        }
    }

    #[test]
    fn test_interrupted_classifies_as_transient() {
        let err = TransportError::from_io(io(io::ErrorKind::Interrupted));
        assert!(err.is_transient());
    }

    #[test]
    fn test_everything_else_is_fatal() {
        let err = TransportError::from_io(io(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, TransportError::Fatal(_)));
        assert!(!err.is_transient());
        assert!(!err.is_session_end());
    }
}
