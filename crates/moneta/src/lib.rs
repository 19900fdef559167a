//! # Moneta
//!
//! A currency lookup service over persistent TCP connections. Clients
//! open one connection and issue many queries before disconnecting,
//! over one of two wire encodings:
//!
//! - a newline-delimited text protocol (`GET <query>`), or
//! - a JSON protocol (`{"Get": "<query>"}`) with a per-request idle
//!   deadline.
//!
//! The layers underneath: `moneta-transport` turns the TCP byte stream
//! into frames and classifies I/O errors, `moneta-protocol` encodes
//! and decodes requests and responses, `moneta-data` owns the
//! read-only currency table. This crate ties them together: the
//! accept loop with transient-failure backoff, and one session task
//! per connection.

mod backoff;
mod error;
mod handler;
mod server;

pub use backoff::Backoff;
pub use error::MonetaError;
pub use server::{CurrencyServer, CurrencyServerBuilder, WireProtocol};
