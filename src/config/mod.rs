/// Database configuration and connection management
pub mod database;

/// HTTP server settings loaded from config.toml
pub mod server;
