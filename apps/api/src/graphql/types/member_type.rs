//! Member type GraphQL types

use async_graphql::{Context, Enum, Object, Result};

use crate::error::to_graphql_error;
use crate::models::MemberType as DbMemberType;
use crate::models::MemberTypeId as DbMemberTypeId;

use super::loaders;
use super::profile::Profile;

/// Membership tier identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum MemberTypeId {
    /// Entry tier
    Basic,
    /// Paid tier
    Business,
}

impl From<DbMemberTypeId> for MemberTypeId {
    fn from(id: DbMemberTypeId) -> Self {
        match id {
            DbMemberTypeId::Basic => Self::Basic,
            DbMemberTypeId::Business => Self::Business,
        }
    }
}

impl From<MemberTypeId> for DbMemberTypeId {
    fn from(id: MemberTypeId) -> Self {
        match id {
            MemberTypeId::Basic => Self::Basic,
            MemberTypeId::Business => Self::Business,
        }
    }
}

/// Membership tier exposed via GraphQL
pub struct MemberType {
    inner: DbMemberType,
}

impl From<DbMemberType> for MemberType {
    fn from(member_type: DbMemberType) -> Self {
        Self { inner: member_type }
    }
}

#[Object]
impl MemberType {
    async fn id(&self) -> MemberTypeId {
        self.inner.id.into()
    }

    /// Discount percentage granted to members
    async fn discount(&self) -> f64 {
        self.inner.discount
    }

    /// Monthly post allowance
    async fn posts_limit_per_month(&self) -> i32 {
        self.inner.posts_limit_per_month
    }

    /// Profiles on this tier (batched per request)
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let profiles = loaders(ctx)?
            .profiles_by_member_type
            .load_one(self.inner.id)
            .await
            .map_err(to_graphql_error)?;

        Ok(profiles
            .unwrap_or_default()
            .into_iter()
            .map(Profile::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_type_id_conversion() {
        for id in DbMemberTypeId::ALL {
            let exposed = MemberTypeId::from(id);
            assert_eq!(DbMemberTypeId::from(exposed), id);
        }
    }
}
