//! Application configuration
//!
//! Environment-driven settings plus the constants used throughout
//! the service.

use crate::error::{AppError, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

// ===== Defaults =====

/// Default SQLite database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "data/richnotes.db";

/// Default listen address for the HTTP API
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8087";

/// Capacity of the refresh broadcast channel. Slow SSE consumers that
/// lag behind this many events miss the older ones and simply re-fetch.
pub const REFRESH_CHANNEL_CAPACITY: usize = 64;

/// Maximum connections in the application pool. The service is designed
/// for connection-constrained databases, so this stays deliberately low.
pub const MAX_POOL_CONNECTIONS: u32 = 5;

/// Runtime configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file (`RICHNOTES_DB`)
    pub database_path: PathBuf,
    /// Socket address the HTTP server binds to (`RICHNOTES_ADDR`)
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// the defaults above.
    pub fn from_env() -> Result<Self> {
        let database_path = std::env::var("RICHNOTES_DB")
            .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string())
            .into();

        let addr = std::env::var("RICHNOTES_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr
            .parse()
            .map_err(|_| AppError::Config(format!("invalid RICHNOTES_ADDR: {}", addr)))?;

        Ok(Self {
            database_path,
            bind_addr,
        })
    }
}
