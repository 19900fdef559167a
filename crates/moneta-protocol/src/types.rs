//! Wire types shared by both protocol variants.
//!
//! Field names on the wire are capitalized (`Get`, `Error`) to match
//! the protocol as clients already speak it; the structs use normal
//! Rust naming and rename via serde attributes.

use serde::{Deserialize, Serialize};

/// A lookup request: one free-text search parameter.
///
/// Wire shape: `{"Get": "<query string>"}`. The query may be a name,
/// code, or country fragment, the wildcard `*`, or empty. Constructed
/// by a codec from raw bytes, handed to the matcher, and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRequest {
    /// The search string.
    #[serde(rename = "Get")]
    pub get: String,
}

/// A protocol-level error reported to the client in-band.
///
/// Wire shape: `{"Error": "<message>"}`. Sent only for decode/encode
/// failures — a zero-match lookup is an empty result array, never one
/// of these, so clients can tell "nothing found" from "bad request".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyError {
    /// Human-readable description of what went wrong.
    #[serde(rename = "Error")]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let req: CurrencyRequest = serde_json::from_str(r#"{"Get":"usd"}"#).unwrap();
        assert_eq!(req.get, "usd");
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"Get":"usd"}"#);
    }

    #[test]
    fn test_error_wire_shape() {
        let err = CurrencyError {
            error: "decode failed".into(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"Error":"decode failed"}"#);
    }
}
