//! GraphQL type definitions for Quill
//!
//! Object types wrap the database models. Every relationship field resolves
//! through exactly one loader of the current request's [`Loaders`].

mod member_type;
mod post;
mod profile;
mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::Post;
pub use profile::Profile;
pub use user::User;

use async_graphql::{Context, Result};

use crate::graphql::loaders::Loaders;

/// The loader registry attached to the request being executed
pub(crate) fn loaders<'a>(ctx: &Context<'a>) -> Result<&'a Loaders> {
    ctx.data::<Loaders>()
}
