//! Member type queries

use async_graphql::{Context, Object, Result};

use crate::error::{to_graphql_error, ApiError};
use crate::graphql::types::{MemberType, MemberTypeId};
use crate::models::MemberTypeId as DbMemberTypeId;
use crate::repositories::SharedStore;

#[derive(Default)]
pub struct MemberTypeQuery;

#[Object]
impl MemberTypeQuery {
    /// List all membership tiers
    async fn member_types(&self, ctx: &Context<'_>) -> Result<Vec<MemberType>> {
        let store = ctx.data::<SharedStore>()?;
        let member_types = store.list_member_types().await.map_err(to_graphql_error)?;
        Ok(member_types.into_iter().map(MemberType::from).collect())
    }

    /// Get a membership tier by ID
    async fn member_type(&self, ctx: &Context<'_>, id: MemberTypeId) -> Result<Option<MemberType>> {
        let store = ctx.data::<SharedStore>()?;
        let id = DbMemberTypeId::from(id);
        let member_type = store
            .find_member_type(id)
            .await
            .map_err(to_graphql_error)?
            .ok_or_else(|| to_graphql_error(ApiError::not_found("member type", id)))?;
        Ok(Some(MemberType::from(member_type)))
    }
}
