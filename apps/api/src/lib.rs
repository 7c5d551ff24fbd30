//! Quill API library
//!
//! This module exposes the core API components for use in integration tests
//! and by the server binary.

pub mod app;
pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod repositories;
pub mod routes;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use graphql::{Executor, LoaderSettings, Loaders, Outcome};
pub use repositories::{MemoryStore, PgStore, SharedStore, Store, StoreError};
