//! Stream-level JSON value reader.

use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncReadExt};

use moneta_transport::TransportError;

use crate::ProtocolError;

const READ_CHUNK: usize = 256;

/// Reads exactly one JSON value per call from a byte stream.
///
/// The JSON protocol has no explicit framing: value boundaries are
/// found by the parser itself. Bytes are accumulated until they form a
/// complete value (`serde_json`'s incremental deserializer reports
/// "need more input" distinctly from "malformed"), and anything past
/// the value's end stays buffered for the next call.
///
/// On a malformed value the buffer is discarded wholesale: there is no
/// reliable resynchronization point inside a broken value, so the
/// reader starts fresh from whatever the peer sends next.
pub struct JsonReader<R> {
    reader: R,
    buf: Vec<u8>,
}

enum Step<T> {
    Value(T, usize),
    Incomplete,
    Malformed(serde_json::Error),
}

impl<R: AsyncRead + Unpin> JsonReader<R> {
    /// Creates a value reader over the given stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Reads the next complete JSON value, decoded as `T`.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly (including a
    /// disconnect mid-value), [`ProtocolError::Decode`] for a malformed
    /// or mismatched value (the session may continue afterwards), and
    /// [`ProtocolError::Transport`] for anything else.
    pub async fn read_value<T: DeserializeOwned>(&mut self) -> Result<Option<T>, ProtocolError> {
        loop {
            let step = {
                let mut values = serde_json::Deserializer::from_slice(&self.buf).into_iter::<T>();
                match values.next() {
                    Some(Ok(value)) => Step::Value(value, values.byte_offset()),
                    Some(Err(e)) if e.is_eof() => Step::Incomplete,
                    Some(Err(e)) => Step::Malformed(e),
                    None => Step::Incomplete,
                }
            };
            match step {
                Step::Value(value, offset) => {
                    self.buf.drain(..offset);
                    return Ok(Some(value));
                }
                Step::Malformed(e) => {
                    self.buf.clear();
                    return Err(ProtocolError::Decode(e));
                }
                Step::Incomplete => {}
            }

            let mut chunk = [0u8; READ_CHUNK];
            match self.reader.read(&mut chunk).await {
                Ok(0) => return Ok(None),
                Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                Err(e) => match TransportError::from_io(e) {
                    TransportError::Closed => return Ok(None),
                    other => return Err(other.into()),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CurrencyRequest;

    fn mock(chunks: &[&[u8]]) -> impl AsyncRead + Unpin {
        let mut builder = tokio_test::io::Builder::new();
        for chunk in chunks {
            builder.read(chunk);
        }
        builder.build()
    }

    #[tokio::test]
    async fn test_reads_one_value() {
        let mut reader = JsonReader::new(mock(&[br#"{"Get":"usd"}"#]));
        let req: CurrencyRequest = reader.read_value().await.unwrap().unwrap();
        assert_eq!(req.get, "usd");
    }

    #[tokio::test]
    async fn test_value_split_across_chunks() {
        let mut reader = JsonReader::new(mock(&[br#"{"Get":"#, br#""usd"}"#]));
        let req: CurrencyRequest = reader.read_value().await.unwrap().unwrap();
        assert_eq!(req.get, "usd");
    }

    #[tokio::test]
    async fn test_two_values_in_one_chunk() {
        // No framing: the second value must survive in the buffer.
        let mut reader = JsonReader::new(mock(&[br#"{"Get":"usd"}{"Get":"eur"}"#]));
        let a: CurrencyRequest = reader.read_value().await.unwrap().unwrap();
        let b: CurrencyRequest = reader.read_value().await.unwrap().unwrap();
        assert_eq!(a.get, "usd");
        assert_eq!(b.get, "eur");
    }

    #[tokio::test]
    async fn test_malformed_value_is_decode_error() {
        let mut reader = JsonReader::new(mock(&[b"not json"]));
        let err = reader
            .read_value::<CurrencyRequest>()
            .await
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
    }

    #[tokio::test]
    async fn test_reader_recovers_after_malformed_value() {
        let mut reader = JsonReader::new(mock(&[b"@@@", br#"{"Get":"usd"}"#]));
        assert!(reader.read_value::<CurrencyRequest>().await.is_err());
        let req: CurrencyRequest = reader.read_value().await.unwrap().unwrap();
        assert_eq!(req.get, "usd");
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_decode_error() {
        // Valid JSON, wrong shape.
        let mut reader = JsonReader::new(mock(&[br#"{"Fetch":"usd"}"#]));
        let err = reader
            .read_value::<CurrencyRequest>()
            .await
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
    }

    #[tokio::test]
    async fn test_clean_eof_is_none() {
        let mut reader = JsonReader::new(mock(&[]));
        let value = reader.read_value::<CurrencyRequest>().await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_disconnect_mid_value_is_none() {
        let mut reader = JsonReader::new(mock(&[br#"{"Get":"us"#]));
        let value = reader.read_value::<CurrencyRequest>().await.unwrap();
        assert!(value.is_none());
    }
}
