use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Instrument, info, info_span};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::handler::Handler;

/// Accepts connections forever, one task per connection.
pub async fn run<H: Handler>(cfg: Arc<Config>, handler: Arc<H>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.server.listen_addr))?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, cfg, handler).await
}

/// Accept loop over an already bound listener.
pub async fn serve<H: Handler>(
    listener: TcpListener,
    cfg: Arc<Config>,
    handler: Arc<H>,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let cfg = cfg.clone();
        let handler = handler.clone();
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, handler, cfg);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
            }
            .instrument(info_span!("conn", %peer)),
        );
    }
}
