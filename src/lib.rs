//! httplet - a minimal HTTP/1.0 request processor
//!
//! Core library for the per-connection pipeline, plus the listener and
//! demo handler used by the binary.

pub mod config;
pub mod demo;
pub mod http;
pub mod server;
