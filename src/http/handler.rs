use std::future::Future;

use bytes::Bytes;
use tokio::io::AsyncWrite;

use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

/// What a handler gets to see of a connection: the parsed request and the
/// writer for the response.
pub struct Context<'a, W> {
    pub request: &'a Request,
    pub writer: &'a mut ResponseWriter<W>,
}

/// Application logic plugged into the connection pipeline.
///
/// Handlers write the whole response themselves, usually starting with
/// [`ResponseWriter::write_success`]. Returning an error before anything
/// was written makes the pipeline answer with the generic failure
/// response; the pipeline flushes the writer after either method returns.
///
/// Implementations can use `async fn`:
///
/// ```
/// use bytes::Bytes;
/// use httplet::http::handler::{Context, Handler};
/// use tokio::io::AsyncWrite;
///
/// struct Hello;
///
/// impl Handler for Hello {
///     async fn handle_get<W>(&self, ctx: &mut Context<'_, W>) -> anyhow::Result<()>
///     where
///         W: AsyncWrite + Unpin + Send,
///     {
///         ctx.writer.write_success("text/plain", 5).await?;
///         ctx.writer.write_body(b"hello").await?;
///         Ok(())
///     }
///
///     async fn handle_post<W>(&self, ctx: &mut Context<'_, W>, _body: Bytes) -> anyhow::Result<()>
///     where
///         W: AsyncWrite + Unpin + Send,
///     {
///         self.handle_get(ctx).await
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    fn handle_get<W>(
        &self,
        ctx: &mut Context<'_, W>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send
    where
        W: AsyncWrite + Unpin + Send;

    /// `body` holds exactly the bytes announced by `Content-Length`, or
    /// nothing when the header was absent.
    fn handle_post<W>(
        &self,
        ctx: &mut Context<'_, W>,
        body: Bytes,
    ) -> impl Future<Output = anyhow::Result<()>> + Send
    where
        W: AsyncWrite + Unpin + Send;
}
