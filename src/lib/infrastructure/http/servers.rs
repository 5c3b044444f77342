//! Servers hosting the API router

pub mod http;
pub mod https;
