//! httpwire - HTTP/1.1 straight from TCP
//!
//! Incremental request parsing, ordered response writing and a
//! connection-per-task dispatcher, without an HTTP library underneath.

pub mod config;
pub mod http;
pub mod server;
