//! HTTP surface for trendr.

pub mod context;
pub mod server;
pub mod types;
