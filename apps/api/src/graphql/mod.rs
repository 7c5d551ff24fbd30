//! GraphQL schema and resolvers for Quill
//!
//! This module contains the async-graphql schema including:
//! - Query and mutation resolvers for users, profiles, posts and member types
//! - Type definitions whose relationship fields resolve through batched loaders
//! - The depth guard and the executor that runs it before every request

pub mod depth;
pub mod executor;
pub mod loaders;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use executor::{Executor, Outcome};
pub use loaders::{LoaderSettings, Loaders};
pub use schema::{build_schema, QuillSchema};
