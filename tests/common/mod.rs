//! Shared helpers for the connection-level tests.

#![allow(dead_code)]

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context as TaskContext, Poll};

use bytes::Bytes;
use httplet::config::Config;
use httplet::http::connection::Connection;
use httplet::http::handler::{Context, Handler};
use httplet::http::request::Method;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};

/// One call seen by [`RecordingHandler`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

/// Records every call and answers with a bare success prologue.
#[derive(Default)]
pub struct RecordingHandler {
    pub calls: Mutex<Vec<Call>>,
}

impl RecordingHandler {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record<W>(&self, ctx: &Context<'_, W>, body: Option<Bytes>) {
        let headers = ctx
            .request
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.calls.lock().unwrap().push(Call {
            method: ctx.request.method.clone(),
            target: ctx.request.target.clone(),
            headers,
            body,
        });
    }
}

impl Handler for RecordingHandler {
    async fn handle_get<W>(&self, ctx: &mut Context<'_, W>) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.record(ctx, None);
        ctx.writer.write_success_html().await?;
        Ok(())
    }

    async fn handle_post<W>(&self, ctx: &mut Context<'_, W>, body: Bytes) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.record(ctx, Some(body));
        ctx.writer.write_success_html().await?;
        Ok(())
    }
}

/// Fails every request without writing anything.
pub struct FailingHandler;

impl Handler for FailingHandler {
    async fn handle_get<W>(&self, _ctx: &mut Context<'_, W>) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        anyhow::bail!("handler exploded")
    }

    async fn handle_post<W>(&self, _ctx: &mut Context<'_, W>, _body: Bytes) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        anyhow::bail!("handler exploded")
    }
}

/// Sends `request` over an in-memory stream, closes the client's write
/// side and returns everything the server wrote plus the pipeline result.
pub async fn exchange<H: Handler>(
    handler: Arc<H>,
    config: Config,
    request: &[u8],
) -> (String, anyhow::Result<()>) {
    let (mut client, server) = tokio::io::duplex(64);

    let task = tokio::spawn(async move {
        let mut conn = Connection::new(server, handler, Arc::new(config));
        conn.run().await
    });

    // The server may stop reading early and hang up on a bad request.
    let _ = client.write_all(request).await;
    let _ = client.shutdown().await;

    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();

    let outcome = task.await.unwrap();
    (String::from_utf8_lossy(&response).into_owned(), outcome)
}

/// A reader that hands out at most `step` bytes per read.
pub struct Trickle {
    data: Vec<u8>,
    pos: usize,
    step: usize,
}

impl Trickle {
    pub fn new(data: &[u8], step: usize) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            step,
        }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl AsyncRead for Trickle {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut TaskContext<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let n = self.step.min(self.remaining()).min(buf.remaining());
        let start = self.pos;
        buf.put_slice(&self.data[start..start + n]);
        self.pos += n;
        Poll::Ready(Ok(()))
    }
}
