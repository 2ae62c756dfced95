//! HTTP surface for Quotebook.
//!
//! # Responsibility
//! - Map GET endpoints onto core services.
//! - Own process-level wiring: configuration, shared state, routing.
//!
//! # Invariants
//! - Handlers never hold the database lock across an `.await`.
//! - Every storage interaction is one transaction.

#![forbid(unsafe_code)]

pub mod config;
pub mod http;
pub mod state;

pub use config::{ConfigError, DbLocation, ServerConfig};
pub use http::build_router;
pub use http::error::ApiError;
pub use state::AppState;
