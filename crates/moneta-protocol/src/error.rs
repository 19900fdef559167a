//! Error types for the protocol layer.

use moneta_transport::TransportError;

/// Errors that can occur while encoding or decoding requests.
///
/// Encode and decode failures are protocol-level: sessions report them
/// to the client in-band and keep running. Transport failures pass
/// through with their classification intact so session handlers can
/// tell a disconnect from a genuine I/O fault.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a value into bytes).
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Deserialization failed: malformed JSON or a value that does not
    /// match the expected request shape.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The underlying stream failed while reading a value.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
