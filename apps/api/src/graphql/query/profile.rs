//! Profile queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::{to_graphql_error, ApiError};
use crate::graphql::types::Profile;
use crate::repositories::SharedStore;

#[derive(Default)]
pub struct ProfileQuery;

#[Object]
impl ProfileQuery {
    /// List all profiles
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let store = ctx.data::<SharedStore>()?;
        let profiles = store.list_profiles().await.map_err(to_graphql_error)?;
        Ok(profiles.into_iter().map(Profile::from).collect())
    }

    /// Get a profile by ID
    async fn profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Profile>> {
        let store = ctx.data::<SharedStore>()?;
        let profile = store
            .find_profile(id)
            .await
            .map_err(to_graphql_error)?
            .ok_or_else(|| to_graphql_error(ApiError::not_found("profile", id)))?;
        Ok(Some(Profile::from(profile)))
    }
}
