//! User GraphQL type
//!
//! Relationship fields go through the request's loaders, so resolving
//! `posts` for a list of fifty users costs one store call, not fifty.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::models::User as DbUser;

use super::loaders;
use super::post::Post;
use super::profile::Profile;

/// User exposed via GraphQL
pub struct User {
    inner: DbUser,
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self { inner: user }
    }
}

fn users(list: Option<Vec<DbUser>>) -> Vec<User> {
    list.unwrap_or_default().into_iter().map(User::from).collect()
}

#[Object]
impl User {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn name(&self) -> &str {
        &self.inner.name
    }

    async fn balance(&self) -> f64 {
        self.inner.balance
    }

    // Relationship resolvers

    /// The user's profile, null when they have none
    async fn profile(&self, ctx: &Context<'_>) -> Result<Option<Profile>> {
        let profile = loaders(ctx)?
            .profile_by_user
            .load_one(self.inner.id)
            .await
            .map_err(to_graphql_error)?;
        Ok(profile.flatten().map(Profile::from))
    }

    /// Posts authored by the user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let posts = loaders(ctx)?
            .posts_by_author
            .load_one(self.inner.id)
            .await
            .map_err(to_graphql_error)?;
        Ok(posts.unwrap_or_default().into_iter().map(Post::from).collect())
    }

    /// Users this user is subscribed to
    async fn user_subscribed_to(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let authors = loaders(ctx)?
            .following
            .load_one(self.inner.id)
            .await
            .map_err(to_graphql_error)?;
        Ok(users(authors))
    }

    /// Users subscribed to this user
    async fn subscribed_to_user(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let subscribers = loaders(ctx)?
            .followers
            .load_one(self.inner.id)
            .await
            .map_err(to_graphql_error)?;
        Ok(users(subscribers))
    }
}
