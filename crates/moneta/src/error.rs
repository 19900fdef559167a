//! Unified error type for the moneta service.

use moneta_data::DataError;
use moneta_protocol::ProtocolError;
use moneta_transport::TransportError;

/// Top-level error that wraps the per-crate errors.
///
/// Session- and codec-level failures are handled inside the session
/// task and never reach the accept loop; what escapes to `main` is
/// startup failure (dataset, bind) or the listener giving up on
/// accepting.
#[derive(Debug, thiserror::Error)]
pub enum MonetaError {
    /// A transport-level error (bind, accept, read, write).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A dataset error at startup.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The listener exhausted its retry budget on consecutive
    /// transient accept failures.
    #[error("giving up after {0} consecutive transient accept failures")]
    AcceptRetriesExhausted(u32),
}
