use std::io;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Starting capacity of a connection's read buffer.
pub const INITIAL_CAPACITY: usize = 1024;

/// Growable byte window between a socket and the request parser.
///
/// Bytes read from the stream are appended after any bytes the parser has
/// not consumed yet. When the window is full the capacity doubles before the
/// next read, so a unit larger than the buffer can always be completed.
#[derive(Debug)]
pub struct ReadBuffer {
    buf: BytesMut,
}

impl Default for ReadBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadBuffer {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity.max(1)),
        }
    }

    /// The bytes read but not yet consumed.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Reads once from `reader`, appending to the unconsumed bytes.
    ///
    /// Returns the number of bytes read; `0` means end of stream.
    pub async fn read_from<R>(&mut self, reader: &mut R) -> io::Result<usize>
    where
        R: AsyncRead + Unpin,
    {
        if self.buf.len() == self.buf.capacity() {
            let current = self.buf.capacity();
            self.buf.reserve(current);
        }
        reader.read_buf(&mut self.buf).await
    }

    /// Drops `n` bytes from the front of the window.
    pub fn consume(&mut self, n: usize) {
        self.buf.advance(n);
    }
}
