use thiserror::Error;

/// Errors that abort the processing of a single connection.
///
/// Every variant is fatal: the pipeline never retries. The kind is logged,
/// the peer only ever sees the generic failure response.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request line did not split into exactly three tokens.
    #[error("invalid http request line: {0:?}")]
    MalformedRequestLine(String),

    /// A header line without a `:` separator.
    #[error("invalid http header line: {0:?}")]
    MalformedHeaderLine(String),

    /// `Content-Length` is not a non-negative integer.
    #[error("invalid Content-Length value: {0:?}")]
    InvalidContentLength(String),

    /// The declared body is larger than the configured cap.
    #[error("Content-Length({declared}) exceeds the limit of {max} bytes")]
    BodyTooLarge { declared: u64, max: u64 },

    /// The peer closed the stream before the message was complete.
    #[error("client disconnected while reading {0}")]
    UnexpectedDisconnect(&'static str),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl HttpError {
    /// Short, stable name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            HttpError::MalformedRequestLine(_) => "MalformedRequestLine",
            HttpError::MalformedHeaderLine(_) => "MalformedHeaderLine",
            HttpError::InvalidContentLength(_) => "InvalidContentLength",
            HttpError::BodyTooLarge { .. } => "BodyTooLarge",
            HttpError::UnexpectedDisconnect(_) => "UnexpectedDisconnect",
            HttpError::Io(_) => "Io",
        }
    }
}
