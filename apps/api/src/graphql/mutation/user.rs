//! User mutations
//!
//! - createUser: Create a user
//! - changeUser: Change name and/or balance
//! - deleteUser: Delete a user with their profile, posts and subscriptions

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::error::{to_graphql_error, ApiError, ApiResult};
use crate::graphql::types::{loaders, User};
use crate::models::{NewUser, UserChanges};
use crate::repositories::SharedStore;

use super::{require_finite, require_text};

/// Input for creating a user
#[derive(Debug, Clone, InputObject)]
pub struct CreateUserInput {
    pub name: String,
    pub balance: f64,
}

impl CreateUserInput {
    fn validate(self) -> ApiResult<NewUser> {
        Ok(NewUser {
            name: require_text("name", &self.name)?,
            balance: require_finite("balance", self.balance)?,
        })
    }
}

/// Input for changing a user; omitted fields stay unchanged
#[derive(Debug, Clone, Default, InputObject)]
pub struct ChangeUserInput {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl ChangeUserInput {
    fn validate(self) -> ApiResult<UserChanges> {
        Ok(UserChanges {
            name: self
                .name
                .map(|name| require_text("name", &name))
                .transpose()?,
            balance: self
                .balance
                .map(|balance| require_finite("balance", balance))
                .transpose()?,
        })
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create a new user
    async fn create_user(&self, ctx: &Context<'_>, dto: CreateUserInput) -> Result<User> {
        let input = dto.validate().map_err(to_graphql_error)?;
        let store = ctx.data::<SharedStore>()?;

        let user = store.create_user(input).await.map_err(to_graphql_error)?;
        tracing::info!(user_id = %user.id, "User created");

        loaders(ctx)?.users.feed_one(user.id, Some(user.clone())).await;
        Ok(User::from(user))
    }

    /// Change an existing user
    async fn change_user(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeUserInput,
    ) -> Result<User> {
        let changes = dto.validate().map_err(to_graphql_error)?;
        let store = ctx.data::<SharedStore>()?;

        let user = store
            .update_user(id, changes)
            .await
            .map_err(to_graphql_error)?
            .ok_or_else(|| to_graphql_error(ApiError::not_found("user", id)))?;

        loaders(ctx)?.users.feed_one(user.id, Some(user.clone())).await;
        Ok(User::from(user))
    }

    /// Delete a user
    ///
    /// Their profile, posts and subscription edges in both directions are
    /// deleted with them.
    async fn delete_user(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let store = ctx.data::<SharedStore>()?;

        if !store.delete_user(id).await.map_err(to_graphql_error)? {
            return Err(to_graphql_error(ApiError::not_found("user", id)));
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(true)
    }
}
