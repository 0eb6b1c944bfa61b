use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::http::buffer::ReadBuffer;
use crate::http::parser::read_request;
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::server::handler::{Handler, HandlerError};

/// One client connection, serving exactly one request.
pub struct Connection<S, H> {
    stream: S,
    buffer: ReadBuffer,
    handler: Arc<H>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Handling(Request),
    Writing(Vec<u8>),
    Rejecting(HandlerError),
    Closing,
    Closed,
}

impl<S, H> Connection<S, H>
where
    S: AsyncRead + AsyncWrite + Unpin,
    H: Handler,
{
    pub fn new(stream: S, handler: Arc<H>) -> Self {
        Self {
            stream,
            buffer: ReadBuffer::new(),
            handler,
            state: ConnectionState::Reading,
        }
    }

    /// Reads the request, runs the handler, writes the response and shuts
    /// the stream down. Only I/O failures while answering are returned.
    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match read_request(&mut self.stream, &mut self.buffer).await {
                        Ok(req) => {
                            debug!(
                                method = req.method(),
                                path = %req.target(),
                                body_len = req.body().len(),
                                "Parsed request"
                            );
                            ConnectionState::Handling(req)
                        }
                        Err(e) => {
                            warn!(error = %e, "Rejecting malformed request");
                            ConnectionState::Rejecting(HandlerError::from(e))
                        }
                    };
                }

                ConnectionState::Handling(req) => {
                    let mut writer = ResponseWriter::new(Vec::new());
                    self.state = match self.handler.handle(&mut writer, &req).await {
                        Ok(()) => ConnectionState::Writing(writer.into_inner()),
                        Err(e) => {
                            warn!(
                                status = e.status.as_u16(),
                                path = %req.target(),
                                "Handler failed: {}",
                                e.message
                            );
                            ConnectionState::Rejecting(e)
                        }
                    };
                }

                ConnectionState::Writing(response) => {
                    self.stream
                        .write_all(&response)
                        .await
                        .context("writing response")?;
                    self.stream.flush().await.context("flushing response")?;
                    debug!(bytes = response.len(), "Response sent");
                    self.state = ConnectionState::Closing;
                }

                ConnectionState::Rejecting(err) => {
                    let mut writer = ResponseWriter::new(&mut self.stream);
                    err.write_to(&mut writer)
                        .await
                        .context("writing error response")?;
                    self.state = ConnectionState::Closing;
                }

                ConnectionState::Closing => {
                    if let Err(e) = self.stream.shutdown().await {
                        debug!(error = %e, "Shutdown after response failed");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }
}
