//! TCP accept loop feeding the connection pipeline.

pub mod listener;
