//! Application layer: configuration and the embedding services.

pub mod config;
pub mod services;

pub use config::EmbedConfig;
