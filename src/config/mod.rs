//! # Configuration Management
//!
//! Environment-driven configuration for the Wardplane control plane.

mod settings;

pub use settings::{AppConfig, AuthConfig, DatabaseConfig, ServerConfig};
