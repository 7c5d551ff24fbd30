//! Post GraphQL type

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::models::Post as DbPost;

use super::loaders;
use super::user::User;

/// Post exposed via GraphQL
pub struct Post {
    inner: DbPost,
}

impl From<DbPost> for Post {
    fn from(post: DbPost) -> Self {
        Self { inner: post }
    }
}

#[Object]
impl Post {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn title(&self) -> &str {
        &self.inner.title
    }

    async fn content(&self) -> &str {
        &self.inner.content
    }

    async fn author_id(&self) -> Uuid {
        self.inner.author_id
    }

    /// Author of the post (batched per request)
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let author = loaders(ctx)?
            .users
            .load_one(self.inner.author_id)
            .await
            .map_err(to_graphql_error)?;
        Ok(author.flatten().map(User::from))
    }
}
