//! The boundary between the dispatcher and application code.

use std::future::Future;

use tokio::io::AsyncWrite;

use crate::http::error::{ParseError, WriteError};
use crate::http::request::Request;
use crate::http::response::{default_headers, StatusCode};
use crate::http::writer::ResponseWriter;

/// Application code invoked once per parsed request.
///
/// The writer is backed by an in-memory buffer that the dispatcher sends to
/// the client only when `handle` succeeds. On failure the buffer is
/// discarded and the [`HandlerError`] is written instead.
///
/// # Example
///
/// ```
/// use httpwire::http::{request::Request, response::{default_headers, StatusCode}, writer::ResponseWriter};
/// use httpwire::server::{Handler, HandlerError};
///
/// struct Hello;
///
/// impl Handler for Hello {
///     async fn handle(&self, w: &mut ResponseWriter<Vec<u8>>, _req: &Request) -> Result<(), HandlerError> {
///         let body = b"hello\n";
///         w.write_status_line(StatusCode::Ok).await?;
///         w.write_headers(&default_headers(body.len())).await?;
///         w.write_body(body).await?;
///         Ok(())
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    fn handle(
        &self,
        w: &mut ResponseWriter<Vec<u8>>,
        req: &Request,
    ) -> impl Future<Output = Result<(), HandlerError>> + Send;
}

/// A failed request, answered with `status` and `message` as a plain-text
/// body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code} {message}", code = .status.as_u16())]
pub struct HandlerError {
    pub status: StatusCode,
    pub message: String,
}

impl HandlerError {
    pub fn new(status: impl Into<StatusCode>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::InternalServerError, message)
    }

    /// Writes the full error response: status line, default headers sized
    /// to the message, and the message itself.
    pub async fn write_to<W>(&self, w: &mut ResponseWriter<W>) -> Result<(), WriteError>
    where
        W: AsyncWrite + Unpin,
    {
        w.write_status_line(self.status).await?;
        w.write_headers(&default_headers(self.message.len())).await?;
        w.write_body(self.message.as_bytes()).await?;
        w.flush().await
    }
}

impl From<ParseError> for HandlerError {
    fn from(err: ParseError) -> Self {
        HandlerError::bad_request(err.to_string())
    }
}

/// A handler that misuses its writer has failed; the client gets a 500.
impl From<WriteError> for HandlerError {
    fn from(err: WriteError) -> Self {
        HandlerError::internal(err.to_string())
    }
}
