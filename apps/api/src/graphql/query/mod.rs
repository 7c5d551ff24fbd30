//! GraphQL queries for Quill
//!
//! This module contains all query resolvers, organized by entity.

mod member_type;
mod post;
mod profile;
mod user;

pub use member_type::MemberTypeQuery;
pub use post::PostQuery;
pub use profile::ProfileQuery;
pub use user::UserQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(UserQuery, ProfileQuery, PostQuery, MemberTypeQuery);
