//! Infrastructure layer: configuration, external service clients, in-memory stores.

pub mod ai;
pub mod config;
pub mod read_model;

pub use config::{AiConfig, AppConfig, ConfigError};
