//! Wire protocols for the moneta currency service.
//!
//! Two encodings of the same request/response exchange:
//!
//! - [`text`] — a newline-delimited command protocol
//!   (`GET <query>` → one result line per record), friendly to netcat
//!   and telnet.
//! - [`JsonCodec`] + [`JsonReader`] — a JSON protocol
//!   (`{"Get": "<query>"}` → array of currency objects, or
//!   `{"Error": "<message>"}` for protocol-level failures).
//!
//! The protocol layer is pure with respect to the network: the text
//! codec works on frames produced by the transport's `FrameReader`,
//! and [`JsonReader`] pulls exactly one JSON value per call from any
//! `AsyncRead` without relying on explicit framing.

mod codec;
mod error;
mod json;
pub mod text;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use json::JsonReader;
pub use types::{CurrencyError, CurrencyRequest};
