//! Wharf API library
//!
//! This crate provides shared types and utilities for the Wharf dashboard:
//!
//! - [`types`] - Common data model (`UsageSample`, `ListeningPort`, `Workspace`, ...)
//! - [`client`] - REST client for the deployment API
//! - [`forward`] - Forwarding-URL construction
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod client;
pub mod config;
pub mod error;
pub mod forward;
pub mod types;

// Re-export commonly used types at the crate root
pub use client::{Client, SESSION_TOKEN_HEADER};
pub use config::{ApiConfig, DashboardConfig, LogFormat, LoggingConfig, load_config, parse_config};
pub use error::{Error, Result};
pub use forward::forward_url;
pub use types::{
    Agent, AgentStatus, ListeningPort, ListeningPortsResponse, UsageInterval, UsageSample,
    Workspace,
};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
