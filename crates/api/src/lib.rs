//! HTTP API: server, routing, and request/response mapping.

pub mod app;
pub mod fixtures;
pub mod middleware;
