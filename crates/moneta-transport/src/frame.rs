//! Newline framing over a chunked byte stream.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::TransportError;

/// Size of one read from the underlying stream. Deliberately small —
/// the reader must behave identically however the bytes are chunked.
const READ_CHUNK: usize = 256;

/// Accumulates raw bytes from a stream into newline-delimited frames.
///
/// TCP delivers a byte stream with no message boundaries: one client
/// line may arrive split across many reads, or several lines may land
/// in a single read. `FrameReader` absorbs both. Bytes are buffered
/// until a `\n` appears; the delimiter is consumed and never returned.
/// Bytes after the delimiter stay in the buffer and become the start of
/// the next frame, so nothing is lost between frames.
///
/// Generic over `AsyncRead` so tests can drive it with mock streams at
/// arbitrary chunk sizes.
pub struct FrameReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Creates a frame reader over the given stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Reads the next complete frame.
    ///
    /// Returns `Ok(Some(frame))` without the trailing `\n` — a frame of
    /// length zero (the client sent a bare newline) is valid and is
    /// handed to the codec like any other. Returns `Ok(None)` on end of
    /// input: either a clean EOF or a peer-closed error. A partial line
    /// with no delimiter at EOF is not a frame; it is discarded and
    /// reported as end of input.
    pub async fn read_frame(&mut self) -> Result<Option<String>, TransportError> {
        loop {
            // A delimiter may already be buffered from a previous read.
            if let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
                let rest = self.buf.split_off(pos + 1);
                self.buf.pop(); // drop the delimiter
                let frame = std::mem::replace(&mut self.buf, rest);
                return Ok(Some(String::from_utf8_lossy(&frame).into_owned()));
            }

            let mut chunk = [0u8; READ_CHUNK];
            match self.reader.read(&mut chunk).await {
                Ok(0) => {
                    if !self.buf.is_empty() {
                        tracing::debug!(
                            bytes = self.buf.len(),
                            "discarding partial frame at end of input"
                        );
                        self.buf.clear();
                    }
                    return Ok(None);
                }
                Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                Err(e) => match TransportError::from_io(e) {
                    TransportError::Closed => {
                        self.buf.clear();
                        return Ok(None);
                    }
                    other => return Err(other),
                },
            }
        }
    }
}
