//! HTTP/1.1 message framing over a raw byte stream.
//!
//! # Architecture
//!
//! - **`headers`**: Case-insensitive, multi-value header table and header line grammar
//! - **`parser`**: Incremental request parser fed from a growing byte window
//! - **`buffer`**: Capacity-doubling read buffer owned by each connection
//! - **`request`**: Parsed request line, headers and body
//! - **`response`**: Status codes and default response headers
//! - **`writer`**: Order-enforcing response writer with chunked encoding
//! - **`connection`**: Drives one connection from first byte to close
//! - **`error`**: Parse and write errors
//!
//! # Connection State Machine
//!
//! Each accepted connection serves exactly one request:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Feed socket bytes to the parser
//!        └──────┬──────┘
//!               │ Request parsed            parse error
//!               ▼                                │
//!        ┌──────────────────┐                    │
//!        │    Handling      │ ← Run handler      │
//!        └──────┬───────────┘                    │
//!               │ ok               handler error ▼
//!               ▼                 ┌──────────────────┐
//!        ┌──────────────────┐     │    Rejecting     │ ← Write error response
//!        │    Writing       │     └────────┬─────────┘
//!        └──────┬───────────┘              │
//!               └───────────┬──────────────┘
//!                           ▼
//!                      Closing → Closed
//! ```
//!
//! # Example
//!
//! ```
//! use httpwire::http::parser::RequestParser;
//!
//! let mut parser = RequestParser::new();
//! let raw = b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\n";
//! assert_eq!(parser.feed(raw).unwrap(), raw.len());
//!
//! let req = parser.finish().unwrap();
//! assert_eq!(req.method(), "GET");
//! assert_eq!(req.header("host"), Some("localhost:42069"));
//! ```

pub mod buffer;
pub mod connection;
pub mod error;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
