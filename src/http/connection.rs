use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, ReadHalf, WriteHalf};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http::body::read_body;
use crate::http::error::HttpError;
use crate::http::handler::{Context, Handler};
use crate::http::parser::{parse_request_line, read_headers};
use crate::http::reader::LineReader;
use crate::http::request::{Method, Request};
use crate::http::status::StatusCode;
use crate::http::writer::ResponseWriter;

/// Processes exactly one request on one stream, then closes it.
pub struct Connection<S, H> {
    reader: LineReader<ReadHalf<S>>,
    writer: ResponseWriter<WriteHalf<S>>,
    handler: Arc<H>,
    config: Arc<Config>,
    state: ConnectionState,
}

#[derive(Debug)]
pub enum ConnectionState {
    Start,
    RequestParsed(Request),
    HeadersParsed(Request),
    Dispatched,
    Flushed,
    Failed,
    Closed,
}

impl<S, H> Connection<S, H>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
    H: Handler,
{
    pub fn new(stream: S, handler: Arc<H>, config: Arc<Config>) -> Self {
        let (read_half, write_half) = tokio::io::split(stream);
        Self {
            reader: LineReader::new(read_half),
            writer: ResponseWriter::new(write_half),
            handler,
            config,
            state: ConnectionState::Start,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Runs the pipeline to completion and closes the stream.
    ///
    /// On failure the generic failure response is sent if nothing has been
    /// written yet, and the error is returned after the stream is closed.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let outcome = self.process().await;

        if let Err(e) = &outcome {
            let kind = match e.downcast_ref::<HttpError>() {
                Some(e) => e.kind(),
                None if e.is::<std::io::Error>() => "Io",
                None => "Handler",
            };
            warn!(kind, error = %e, "request failed");

            // The stream may already be broken; nothing more to do then.
            if !self.writer.has_written() {
                let _ = self.writer.write_failure().await;
            }
            let _ = self.writer.flush().await;
        }

        if let Err(e) = self.writer.shutdown().await {
            debug!(error = %e, "shutdown failed");
        }
        self.state = ConnectionState::Closed;

        outcome
    }

    async fn process(&mut self) -> anyhow::Result<()> {
        loop {
            // Failed stays in place if any step below returns early.
            let state = std::mem::replace(&mut self.state, ConnectionState::Failed);

            self.state = match state {
                ConnectionState::Start => {
                    let line = self.reader.read_line().await?;
                    let request = parse_request_line(&line)?;
                    info!("starting: {}", line);
                    ConnectionState::RequestParsed(request)
                }

                ConnectionState::RequestParsed(mut request) => {
                    request.headers = read_headers(&mut self.reader).await?;
                    ConnectionState::HeadersParsed(request)
                }

                ConnectionState::HeadersParsed(request) => {
                    self.dispatch(&request).await?;
                    ConnectionState::Dispatched
                }

                ConnectionState::Dispatched => {
                    self.writer.flush().await?;
                    ConnectionState::Flushed
                }

                done @ (ConnectionState::Flushed
                | ConnectionState::Failed
                | ConnectionState::Closed) => {
                    self.state = done;
                    return Ok(());
                }
            };
        }
    }

    async fn dispatch(&mut self, request: &Request) -> anyhow::Result<()> {
        match request.method {
            Method::GET => {
                let mut ctx = Context {
                    request,
                    writer: &mut self.writer,
                };
                self.handler.handle_get(&mut ctx).await
            }

            Method::POST => {
                let body = read_body(
                    self.reader.inner_mut(),
                    &request.headers,
                    &self.config.limits,
                )
                .await?;

                let mut ctx = Context {
                    request,
                    writer: &mut self.writer,
                };
                self.handler.handle_post(&mut ctx, body).await
            }

            _ if self.config.server.reject_unknown_methods => {
                debug!(method = %request.method, "rejecting method");
                self.writer.write_status(StatusCode::MethodNotAllowed).await?;
                self.writer.write_header("Connection", "close").await?;
                self.writer.write_blank_line().await?;
                Ok(())
            }

            _ => {
                debug!(method = %request.method, "method not dispatched");
                Ok(())
            }
        }
    }
}
