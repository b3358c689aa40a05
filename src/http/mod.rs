//! HTTP/1.0 request processing.
//!
//! One connection carries one request. There is no keep-alive, no chunked
//! transfer and no pipelining: the server reads a request, hands it to a
//! [`Handler`](handler::Handler), flushes the response and closes.
//!
//! # Architecture
//!
//! - **`reader`**: Splits the incoming byte stream into lines
//! - **`parser`**: Request line and header block parsing
//! - **`headers`**: The insertion-ordered header map
//! - **`body`**: `Content-Length` framed body reading with a size cap
//! - **`writer`**: Buffered response writer and the canned prologues
//! - **`handler`**: The trait applications implement
//! - **`connection`**: The per-connection state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │    Start    │ ← Wait for the request line
//!        └──────┬──────┘
//!               │ Request line parsed
//!               ▼
//!        ┌──────────────────┐
//!        │  RequestParsed   │ ← Read headers up to the blank line
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │  HeadersParsed   │ ← GET: call handler, POST: read body first
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatched     │ ← Flush the response
//!        └──────┬───────────┘
//!               ▼
//!            Flushed ──► Closed
//!
//!   any error before Flushed ──► Failed ──► (404 if nothing written) ──► Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use httplet::config::Config;
//! use httplet::demo::DemoHandler;
//! use httplet::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(Config::default());
//!     let handler = Arc::new(DemoHandler::new(Vec::new()));
//!     let listener = TcpListener::bind("127.0.0.1:12345").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let (handler, config) = (handler.clone(), config.clone());
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, handler, config);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod body;
pub mod connection;
pub mod error;
pub mod handler;
pub mod headers;
pub mod parser;
pub mod reader;
pub mod request;
pub mod status;
pub mod writer;

pub use error::HttpError;
pub use handler::{Context, Handler};
pub use headers::HeaderSet;
pub use request::{Method, Request};
