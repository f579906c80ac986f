//! Networking utilities and proxy-aware client builders for trendr.

pub mod client;
pub mod config;

pub use client::build_http_client;
pub use config::{NetMode, NetProfile};
