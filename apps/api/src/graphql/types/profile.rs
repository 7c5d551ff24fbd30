//! Profile GraphQL type

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::models::Profile as DbProfile;

use super::loaders;
use super::member_type::{MemberType, MemberTypeId};
use super::user::User;

/// Profile exposed via GraphQL
pub struct Profile {
    inner: DbProfile,
}

impl From<DbProfile> for Profile {
    fn from(profile: DbProfile) -> Self {
        Self { inner: profile }
    }
}

#[Object]
impl Profile {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn is_male(&self) -> bool {
        self.inner.is_male
    }

    async fn year_of_birth(&self) -> i32 {
        self.inner.year_of_birth
    }

    /// Owning user ID
    async fn user_id(&self) -> Uuid {
        self.inner.user_id
    }

    async fn member_type_id(&self) -> MemberTypeId {
        self.inner.member_type_id.into()
    }

    // Relationship resolvers

    /// Owning user (batched per request)
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let user = loaders(ctx)?
            .users
            .load_one(self.inner.user_id)
            .await
            .map_err(to_graphql_error)?;
        Ok(user.flatten().map(User::from))
    }

    /// Membership tier (batched per request)
    async fn member_type(&self, ctx: &Context<'_>) -> Result<Option<MemberType>> {
        let member_type = loaders(ctx)?
            .member_types
            .load_one(self.inner.member_type_id)
            .await
            .map_err(to_graphql_error)?;
        Ok(member_type.flatten().map(MemberType::from))
    }
}
