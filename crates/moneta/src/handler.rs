//! Per-connection session handlers.
//!
//! Each accepted connection gets its own task running one of these
//! loops. A session cycles `AwaitingRequest → Dispatching → Responding`
//! until it reaches one of two terminal states: returning `Ok(())` is
//! `ClosedClean` (the client disconnected, or the JSON idle deadline
//! fired), returning `Err` is `ClosedError` (unrecoverable I/O).
//!
//! Requests are handled strictly in arrival order: the loop does not
//! read the next request until the current response is fully written.
//! A malformed request never terminates a session. A mid-response
//! write failure does — continuing would silently drop result lines
//! the client has no way to know about.

use std::sync::Arc;

use moneta_data::find;
use moneta_protocol::text::{self, TextCommand};
use moneta_protocol::{Codec, CurrencyError, CurrencyRequest, JsonReader, ProtocolError};
use moneta_transport::{ConnectionWriter, FrameReader, TcpConnection};

use crate::MonetaError;
use crate::server::{ServerState, WireProtocol};

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: TcpConnection,
    state: Arc<ServerState>,
) -> Result<(), MonetaError> {
    let id = conn.id();
    let peer = conn.peer();
    tracing::info!(%id, %peer, "session started");

    let result = match state.protocol {
        WireProtocol::Text => text_session(conn, &state).await,
        WireProtocol::Json => json_session(conn, &state).await,
    };
    // The connection halves drop inside the session functions, so the
    // socket is closed on every path out, panics included (the task
    // owns all per-session state).
    match &result {
        Ok(()) => tracing::info!(%id, %peer, "session closed"),
        Err(e) => tracing::warn!(%id, %peer, error = %e, "session failed"),
    }
    result
}

/// Writes a response, folding a peer disconnect into clean teardown.
///
/// Any other write failure aborts the session.
async fn send(writer: &mut ConnectionWriter, data: &[u8]) -> Result<bool, MonetaError> {
    match writer.send(data).await {
        Ok(()) => Ok(true),
        Err(e) if e.is_session_end() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// The text-protocol session loop.
///
/// No idle deadline: the loop runs until the client disconnects or an
/// I/O error occurs.
async fn text_session(conn: TcpConnection, state: &ServerState) -> Result<(), MonetaError> {
    let id = conn.id();
    let (read, mut writer) = conn.into_split();
    let mut frames = FrameReader::new(read);

    if !send(&mut writer, text::BANNER.as_bytes()).await? {
        return Ok(());
    }

    loop {
        let frame = match frames.read_frame().await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::debug!(%id, "client disconnected");
                return Ok(());
            }
            Err(e) if e.is_session_end() => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let response = match text::parse_command(&frame) {
            Some(TextCommand::Get(param)) => {
                let results = find(&state.table, &param);
                tracing::debug!(%id, query = %param, matches = results.len(), "lookup");
                text::render_results(&results)
            }
            None => {
                tracing::debug!(%id, %frame, "invalid command");
                text::INVALID_COMMAND.to_string()
            }
        };

        if !send(&mut writer, response.as_bytes()).await? {
            return Ok(());
        }
    }
}

/// The JSON-protocol session loop.
///
/// The idle deadline is re-armed on every pass: it bounds the gap
/// between the end of one exchange and the arrival of the next
/// complete request, not the session as a whole. When it fires, the
/// session closes with nothing written, same as a clean disconnect.
async fn json_session(conn: TcpConnection, state: &ServerState) -> Result<(), MonetaError> {
    let id = conn.id();
    let (read, mut writer) = conn.into_split();
    let mut values = JsonReader::new(read);

    loop {
        let request: CurrencyRequest =
            match tokio::time::timeout(state.idle_timeout, values.read_value()).await {
                Ok(Ok(Some(request))) => request,
                Ok(Ok(None)) => {
                    tracing::debug!(%id, "client disconnected");
                    return Ok(());
                }
                Ok(Err(ProtocolError::Decode(e))) => {
                    // Malformed request: report in-band, keep the session.
                    tracing::debug!(%id, error = %e, "malformed request");
                    let reply = CurrencyError {
                        error: e.to_string(),
                    };
                    if !send_error(&mut writer, state, &reply).await? {
                        return Ok(());
                    }
                    continue;
                }
                Ok(Err(ProtocolError::Transport(e))) if e.is_session_end() => return Ok(()),
                Ok(Err(e)) => return Err(e.into()),
                Err(_elapsed) => {
                    tracing::debug!(%id, "idle deadline reached, disconnecting");
                    return Ok(());
                }
            };

        let results = find(&state.table, &request.get);
        tracing::debug!(%id, query = %request.get, matches = results.len(), "lookup");

        // A zero-match lookup is an empty array, never an error object.
        let payload = match state.codec.encode(&results) {
            Ok(bytes) => bytes,
            Err(e) => {
                // Best effort: describe the encode failure to the
                // client; if even that won't encode, give up.
                let fallback = CurrencyError {
                    error: e.to_string(),
                };
                state.codec.encode(&fallback)?
            }
        };
        if !send_framed(&mut writer, payload).await? {
            return Ok(());
        }
    }
}

/// Encodes an in-band protocol error and sends it.
async fn send_error(
    writer: &mut ConnectionWriter,
    state: &ServerState,
    reply: &CurrencyError,
) -> Result<bool, MonetaError> {
    let payload = state.codec.encode(reply)?;
    send_framed(writer, payload).await
}

/// Sends an encoded JSON value followed by a newline, one value per
/// line on the wire.
async fn send_framed(writer: &mut ConnectionWriter, mut payload: Vec<u8>) -> Result<bool, MonetaError> {
    payload.push(b'\n');
    send(writer, &payload).await
}
