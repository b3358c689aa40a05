use tokio::io::AsyncRead;
use tracing::debug;

use crate::http::error::HttpError;
use crate::http::headers::HeaderSet;
use crate::http::reader::LineReader;
use crate::http::request::{Method, Request};

/// Parses `<METHOD> <TARGET> <VERSION>`.
///
/// The line is split on single spaces and must give exactly three tokens,
/// so doubled spaces or a missing version are both malformed.
pub fn parse_request_line(line: &str) -> Result<Request, HttpError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    let &[method, target, version] = tokens.as_slice() else {
        return Err(HttpError::MalformedRequestLine(line.to_string()));
    };

    Ok(Request {
        method: Method::parse(method),
        target: target.to_string(),
        version: version.to_string(),
        headers: HeaderSet::new(),
    })
}

/// Splits one header line at its first colon.
///
/// Spaces after the colon are stripped from the value; tabs and trailing
/// whitespace are kept.
pub fn parse_header_line(line: &str) -> Result<(&str, &str), HttpError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| HttpError::MalformedHeaderLine(line.to_string()))?;

    Ok((name, value.trim_start_matches(' ')))
}

/// Reads header lines up to and including the empty line that ends them.
pub async fn read_headers<R>(reader: &mut LineReader<R>) -> Result<HeaderSet, HttpError>
where
    R: AsyncRead + Unpin,
{
    let mut headers = HeaderSet::new();

    loop {
        let line = reader.read_line().await?;
        if line.is_empty() {
            debug!(count = headers.len(), "got headers");
            return Ok(headers);
        }

        let (name, value) = parse_header_line(&line)?;
        debug!("header: {}:{}", name, value);
        headers.insert(name, value);
    }
}
