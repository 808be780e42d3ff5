//! # Wardplane
//!
//! Wardplane is the control plane for a fleet of traffic-handling
//! workers. It owns tenant projects and their API credentials, and
//! serves a sanitized configuration snapshot that workers poll and
//! cache in memory. Workers never touch the database.
//!
//! ## Architecture
//!
//! ```text
//! Admin API ──► Services ──► Repositories ──► SQLite
//!                  ▲
//! Worker fetch ────┘  (shared-secret gate, snapshot built per request)
//! ```
//!
//! The core subsystem is the credential lifecycle: raw secrets are
//! hashed with Argon2id and never persisted in recoverable form, each
//! project has at most one active credential (enforced transactionally
//! plus a partial unique index), and revocation is visible to the very
//! next snapshot because nothing between the database and the worker
//! endpoint caches.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod services;
pub mod storage;

pub use config::AppConfig;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
