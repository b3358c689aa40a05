use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::config::Limits;
use crate::http::error::HttpError;
use crate::http::headers::HeaderSet;

pub const CONTENT_LENGTH: &str = "Content-Length";

/// Returns the declared body length, or `None` when there is no
/// `Content-Length` header.
pub fn content_length(headers: &HeaderSet) -> Result<Option<u64>, HttpError> {
    headers
        .get_ignore_case(CONTENT_LENGTH)
        .map(|v| {
            v.trim()
                .parse::<u64>()
                .map_err(|_| HttpError::InvalidContentLength(v.to_string()))
        })
        .transpose()
}

/// Reads exactly `Content-Length` bytes from `reader`.
///
/// Without the header the stream is not touched at all and the body is
/// empty. A declared length above `limits.max_body_size` is rejected
/// before anything is read.
pub async fn read_body<R>(
    reader: &mut R,
    headers: &HeaderSet,
    limits: &Limits,
) -> Result<Bytes, HttpError>
where
    R: AsyncRead + Unpin,
{
    let Some(declared) = content_length(headers)? else {
        return Ok(Bytes::new());
    };

    if declared > limits.max_body_size {
        return Err(HttpError::BodyTooLarge {
            declared,
            max: limits.max_body_size,
        });
    }

    debug!(content_length = declared, "get post data start");

    let mut to_read = usize::try_from(declared).map_err(|_| HttpError::BodyTooLarge {
        declared,
        max: limits.max_body_size,
    })?;
    let chunk_size = limits.chunk_size.max(1);

    // Grows as bytes arrive; the declared length alone reserves nothing.
    let mut body = BytesMut::with_capacity(to_read.min(chunk_size));
    let mut chunk = vec![0u8; to_read.min(chunk_size)];

    while to_read > 0 {
        let want = to_read.min(chunk.len());
        let n = reader.read(&mut chunk[..want]).await?;
        trace!(to_read, n, "body chunk read");

        if n == 0 {
            return Err(HttpError::UnexpectedDisconnect("the request body"));
        }

        body.extend_from_slice(&chunk[..n]);
        to_read -= n;
    }

    debug!(len = body.len(), "get post data end");
    Ok(body.freeze())
}
