use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::error::WriteError;
use crate::http::headers::Headers;
use crate::http::response::StatusCode;

const HTTP_VERSION: &str = "HTTP/1.1";
const CRLF: &[u8] = b"\r\n";
const LAST_CHUNK: &[u8] = b"0\r\n";

/// The response phase a [`ResponseWriter`] expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    StatusLine,
    Headers,
    Body,
    Trailers,
}

/// Writes an HTTP/1.1 response in order.
///
/// The status line must come first, then the headers, then any number of
/// body writes. A chunked body ends with
/// [`write_chunked_body_done`](Self::write_chunked_body_done), after which
/// trailers may be written. A call made out of order fails with
/// [`WriteError::StateViolation`] and writes nothing.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    inner: W,
    state: WriterState,
}

impl<W> ResponseWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            state: WriterState::StatusLine,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn expect_state(&self, expected: WriterState, operation: &'static str) -> Result<(), WriteError> {
        if self.state != expected {
            return Err(WriteError::StateViolation {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }
}

impl<W: AsyncWrite + Unpin> ResponseWriter<W> {
    /// Writes `HTTP/1.1 <code> <reason>\r\n`.
    pub async fn write_status_line(&mut self, status: StatusCode) -> Result<(), WriteError> {
        self.expect_state(WriterState::StatusLine, "write status line")?;

        let line = format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            status.as_u16(),
            status.reason_phrase()
        );
        self.inner.write_all(line.as_bytes()).await?;

        self.state = WriterState::Headers;
        Ok(())
    }

    /// Writes every header as `name: value\r\n` and the blank line after them.
    pub async fn write_headers(&mut self, headers: &Headers) -> Result<(), WriteError> {
        self.expect_state(WriterState::Headers, "write headers")?;

        let mut buf = Vec::new();
        headers.encode(&mut buf);
        self.inner.write_all(&buf).await?;

        self.state = WriterState::Body;
        Ok(())
    }

    /// Writes raw body bytes with no framing.
    pub async fn write_body(&mut self, body: &[u8]) -> Result<usize, WriteError> {
        self.expect_state(WriterState::Body, "write body")?;

        self.inner.write_all(body).await?;
        Ok(body.len())
    }

    /// Writes one chunk as `<hex length>\r\n<data>\r\n`.
    ///
    /// An empty chunk writes nothing, since a zero length chunk marks the end
    /// of the body. Returns the number of bytes put on the wire.
    pub async fn write_chunked_body(&mut self, chunk: &[u8]) -> Result<usize, WriteError> {
        self.expect_state(WriterState::Body, "write chunked body")?;

        if chunk.is_empty() {
            return Ok(0);
        }

        let size = format!("{:x}\r\n", chunk.len());
        let mut buf = Vec::with_capacity(size.len() + chunk.len() + CRLF.len());
        buf.extend_from_slice(size.as_bytes());
        buf.extend_from_slice(chunk);
        buf.extend_from_slice(CRLF);
        self.inner.write_all(&buf).await?;

        Ok(buf.len())
    }

    /// Writes the terminating `0\r\n` chunk. Trailers may follow.
    pub async fn write_chunked_body_done(&mut self) -> Result<usize, WriteError> {
        self.expect_state(WriterState::Body, "finish chunked body")?;

        self.inner.write_all(LAST_CHUNK).await?;

        self.state = WriterState::Trailers;
        Ok(LAST_CHUNK.len())
    }

    /// Writes trailer fields after a chunked body, then the final blank line.
    pub async fn write_trailers(&mut self, trailers: &Headers) -> Result<(), WriteError> {
        self.expect_state(WriterState::Trailers, "write trailers")?;

        let mut buf = Vec::new();
        trailers.encode(&mut buf);
        self.inner.write_all(&buf).await?;

        self.state = WriterState::Body;
        Ok(())
    }

    pub async fn flush(&mut self) -> Result<(), WriteError> {
        self.inner.flush().await?;
        Ok(())
    }
}
