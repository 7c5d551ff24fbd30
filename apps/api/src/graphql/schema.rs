//! GraphQL schema builder for Quill
//!
//! This module provides the schema construction for the async-graphql API.
//! The schema carries only process-wide data (the store handle); the
//! per-request loader registry is attached by the [`Executor`](super::Executor).

use async_graphql::{EmptySubscription, Schema};

use crate::repositories::SharedStore;

use super::mutation::Mutation;
use super::query::Query;

/// The Quill GraphQL schema type
pub type QuillSchema = Schema<Query, Mutation, EmptySubscription>;

/// Create the GraphQL schema over `store`
pub fn build_schema(store: SharedStore) -> QuillSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(store)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_sdl_exposes_relationship_fields() {
        let schema = build_schema(Arc::new(MemoryStore::new()));
        let sdl = schema.sdl();

        assert!(sdl.contains("userSubscribedTo: [User!]!"));
        assert!(sdl.contains("subscribedToUser: [User!]!"));
        assert!(sdl.contains("memberType(id: MemberTypeId!): MemberType"));
        assert!(sdl.contains("enum MemberTypeId"));
        assert!(sdl.contains("BUSINESS"));
    }
}
