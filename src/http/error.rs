//! Error types for request parsing and response writing.

use crate::http::parser::ParseState;
use crate::http::writer::WriterState;

/// Errors produced while turning bytes from the wire into a [`Request`].
///
/// Every variant except [`ParseError::Io`] is terminal for the parser that
/// produced it.
///
/// [`Request`]: crate::http::request::Request
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The stream ended before a full request arrived.
    #[error("incomplete request: stream ended while {state:?}")]
    IncompleteRequest { state: ParseState },

    /// The request line is not `METHOD SP TARGET SP HTTP/1.1`.
    #[error("malformed request line: {0}")]
    MalformedRequestLine(#[from] RequestLineError),

    /// A header line violates the field grammar.
    #[error("invalid header syntax: {0}")]
    InvalidHeaderSyntax(#[from] HeaderError),

    /// The body disagrees with the declared Content-Length.
    #[error("content-length overflow: {0}")]
    ContentLengthOverflow(#[from] ContentLengthError),

    /// `feed` was called on a parser that already produced a request.
    #[error("parser invoked after completion")]
    AlreadyDone,

    /// `feed` was called on a parser that already failed.
    #[error("parser invoked after a previous failure")]
    Failed,

    /// Reading from the connection failed.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestLineError {
    #[error("expected 3 space separated parts, found {0}")]
    TokenCount(usize),
    #[error("invalid method {0:?}: must be uppercase letters")]
    InvalidMethod(String),
    #[error("unsupported http version {0:?}, only HTTP/1.1 is supported")]
    UnsupportedVersion(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("missing ':' separator")]
    MissingColon,
    #[error("whitespace before ':' in field name {0:?}")]
    SpaceBeforeColon(String),
    #[error("empty field name")]
    EmptyName,
    #[error("field name contains invalid character {0:?}")]
    InvalidCharacter(char),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentLengthError {
    #[error("invalid content-length value {0:?}")]
    Invalid(String),
    #[error("received {received} body bytes, content-length declared {declared}")]
    Exceeded { declared: usize, received: usize },
}

/// Errors produced by [`ResponseWriter`](crate::http::writer::ResponseWriter).
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// A write was attempted outside the phase it belongs to. Nothing was
    /// written for the offending call.
    #[error("cannot {operation} in state {state:?}")]
    StateViolation {
        operation: &'static str,
        state: WriterState,
    },

    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}
