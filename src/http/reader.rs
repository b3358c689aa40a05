use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::http::error::HttpError;

const LINE_CAPACITY: usize = 256;

/// Reads a byte stream one line at a time.
///
/// Lines end at `\n`. Every `\r` is dropped wherever it appears, and the
/// remaining bytes are taken one-to-one as characters (Latin-1), so no
/// input can fail to decode. The underlying stream stays buffered: bytes
/// after the last line read are still available through [`inner_mut`]
/// for the body reader.
///
/// [`inner_mut`]: LineReader::inner_mut
pub struct LineReader<R> {
    inner: BufReader<R>,
    scratch: Vec<u8>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            inner: BufReader::new(source),
            scratch: Vec::with_capacity(LINE_CAPACITY),
        }
    }

    /// Reads the next line, without its terminator.
    ///
    /// Waits for more data as long as the stream is open. Reaching the end
    /// of the stream before a line feed is an [`HttpError::UnexpectedDisconnect`].
    pub async fn read_line(&mut self) -> Result<String, HttpError> {
        self.scratch.clear();
        self.inner.read_until(b'\n', &mut self.scratch).await?;

        match self.scratch.pop() {
            Some(b'\n') => {}
            _ => return Err(HttpError::UnexpectedDisconnect("a line")),
        }

        Ok(self
            .scratch
            .iter()
            .filter(|&&b| b != b'\r')
            .map(|&b| char::from(b))
            .collect())
    }

    /// The buffered stream, positioned right after the last line read.
    pub fn inner_mut(&mut self) -> &mut BufReader<R> {
        &mut self.inner
    }
}
