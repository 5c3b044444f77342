//! Infrastructure layer: HTTP server and provider adapters

pub mod email;
pub mod http;
