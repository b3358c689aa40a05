use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use httplet::config::Config;
use httplet::demo::DemoHandler;
use httplet::server;

/// Minimal HTTP/1.0 test server.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Port to listen on, bound to the loopback interface
    port: Option<u16>,

    /// YAML configuration file (overrides the CONFIG environment variable)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if let Some(port) = args.port {
        cfg.server.listen_addr = format!("127.0.0.1:{}", port);
    }

    let handler = Arc::new(DemoHandler::new(cfg.static_files.clone()));
    let cfg = Arc::new(cfg);

    tokio::select! {
        res = server::listener::run(cfg, handler) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
