use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufWriter};

use crate::http::status::StatusCode;

const HTTP_VERSION: &str = "HTTP/1.0";
const CRLF: &[u8] = b"\r\n";

pub const DEFAULT_CONTENT_TYPE: &str = "text/html";
const FAILURE_REASON: &str = "File not found";

/// Encodes head text one byte per char, the way `LineReader` decodes it.
fn latin1(text: &str) -> std::io::Result<Vec<u8>> {
    text.chars()
        .map(|c| {
            u8::try_from(c).map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{:?} cannot be sent in a response head", c),
                )
            })
        })
        .collect()
}

/// Buffered writer for one HTTP/1.0 response.
///
/// Output is held in memory until [`flush`](Self::flush); a writer that is
/// dropped without flushing loses whatever it still holds. The writer keeps
/// no notion of response structure beyond counting bytes: callers write the
/// status line, headers, blank line and body in that order, or use one of
/// the canned prologues.
pub struct ResponseWriter<W> {
    inner: BufWriter<W>,
    written: u64,
}

impl<W: AsyncWrite + Unpin> ResponseWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            inner: BufWriter::new(sink),
            written: 0,
        }
    }

    /// Whether anything has been written yet, flushed or not.
    pub fn has_written(&self) -> bool {
        self.written > 0
    }

    /// Total bytes handed to the writer so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Status line and header text is sent as Latin-1; a char above
    /// U+00FF is an `InvalidInput` error and nothing is written.
    pub async fn write_status_line(&mut self, code: u16, reason: &str) -> std::io::Result<()> {
        let line = format!("{} {} {}\r\n", HTTP_VERSION, code, reason);
        self.write_body(&latin1(&line)?).await
    }

    pub async fn write_status(&mut self, status: StatusCode) -> std::io::Result<()> {
        self.write_status_line(status.as_u16(), status.reason_phrase())
            .await
    }

    pub async fn write_header(&mut self, name: &str, value: &str) -> std::io::Result<()> {
        let line = format!("{}: {}\r\n", name, value);
        self.write_body(&latin1(&line)?).await
    }

    /// Ends the header block. Everything after it is body.
    pub async fn write_blank_line(&mut self) -> std::io::Result<()> {
        self.write_body(CRLF).await
    }

    /// Writes raw bytes.
    pub async fn write_body(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(bytes).await?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    /// Writes `text` followed by `\r\n`.
    pub async fn write_line(&mut self, text: &str) -> std::io::Result<()> {
        self.write_body(text.as_bytes()).await?;
        self.write_body(CRLF).await
    }

    /// Streams everything `source` yields into the response.
    ///
    /// Returns the number of bytes copied. When the prologue declared a
    /// `Content-Length`, the source must produce exactly that many bytes.
    pub async fn copy_from<R>(&mut self, source: &mut R) -> std::io::Result<u64>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let n = tokio::io::copy(source, &mut self.inner).await?;
        self.written += n;
        Ok(n)
    }

    /// `200 OK` prologue.
    ///
    /// `Content-Length` is only sent when `length` is non-zero, so a
    /// handler streaming output of unknown size passes 0.
    pub async fn write_success(&mut self, content_type: &str, length: u64) -> std::io::Result<()> {
        self.write_status(StatusCode::Ok).await?;
        self.write_header("Content-Type", content_type).await?;
        if length != 0 {
            self.write_header("Content-Length", &length.to_string())
                .await?;
        }
        self.write_header("Connection", "close").await?;
        self.write_blank_line().await
    }

    /// `200 OK` prologue for an HTML body of unknown length.
    pub async fn write_success_html(&mut self) -> std::io::Result<()> {
        self.write_success(DEFAULT_CONTENT_TYPE, 0).await
    }

    /// The generic `404` prologue sent when a request fails.
    pub async fn write_failure(&mut self) -> std::io::Result<()> {
        self.write_status_line(StatusCode::NotFound.as_u16(), FAILURE_REASON)
            .await?;
        self.write_header("Connection", "close").await?;
        self.write_blank_line().await
    }

    pub async fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush().await
    }

    /// Flushes and shuts down the write side of the stream.
    pub async fn shutdown(&mut self) -> std::io::Result<()> {
        self.inner.shutdown().await
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}
