//! Profile mutations
//!
//! - createProfile: Create the profile of a user (one per user)
//! - changeProfile: Change gender flag, year of birth or tier
//! - deleteProfile: Delete a profile

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::error::{to_graphql_error, ApiError, ApiResult};
use crate::graphql::types::{loaders, MemberTypeId, Profile};
use crate::models::{NewProfile, ProfileChanges};
use crate::repositories::SharedStore;

use super::require_year_of_birth;

/// Input for creating a profile
#[derive(Debug, Clone, InputObject)]
pub struct CreateProfileInput {
    pub is_male: bool,
    pub year_of_birth: i32,
    /// Owning user; must exist and must not have a profile yet
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

impl CreateProfileInput {
    fn validate(self) -> ApiResult<NewProfile> {
        Ok(NewProfile {
            is_male: self.is_male,
            year_of_birth: require_year_of_birth(self.year_of_birth)?,
            user_id: self.user_id,
            member_type_id: self.member_type_id.into(),
        })
    }
}

/// Input for changing a profile; the owning user cannot be changed
#[derive(Debug, Clone, Default, InputObject)]
pub struct ChangeProfileInput {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl ChangeProfileInput {
    fn validate(self) -> ApiResult<ProfileChanges> {
        Ok(ProfileChanges {
            is_male: self.is_male,
            year_of_birth: self.year_of_birth.map(require_year_of_birth).transpose()?,
            member_type_id: self.member_type_id.map(Into::into),
        })
    }
}

#[derive(Default)]
pub struct ProfileMutation;

#[Object]
impl ProfileMutation {
    /// Create a profile for a user
    ///
    /// Fails with CONFLICT if the user already has one and with
    /// INVALID_REFERENCE if the user does not exist.
    async fn create_profile(&self, ctx: &Context<'_>, dto: CreateProfileInput) -> Result<Profile> {
        let input = dto.validate().map_err(to_graphql_error)?;
        let store = ctx.data::<SharedStore>()?;

        let profile = store.create_profile(input).await.map_err(to_graphql_error)?;
        tracing::info!(profile_id = %profile.id, user_id = %profile.user_id, "Profile created");

        loaders(ctx)?
            .profile_by_user
            .feed_one(profile.user_id, Some(profile.clone()))
            .await;
        Ok(Profile::from(profile))
    }

    /// Change an existing profile
    async fn change_profile(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeProfileInput,
    ) -> Result<Profile> {
        let changes = dto.validate().map_err(to_graphql_error)?;
        let store = ctx.data::<SharedStore>()?;

        let profile = store
            .update_profile(id, changes)
            .await
            .map_err(to_graphql_error)?
            .ok_or_else(|| to_graphql_error(ApiError::not_found("profile", id)))?;

        loaders(ctx)?
            .profile_by_user
            .feed_one(profile.user_id, Some(profile.clone()))
            .await;
        Ok(Profile::from(profile))
    }

    /// Delete a profile
    async fn delete_profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let store = ctx.data::<SharedStore>()?;

        if !store.delete_profile(id).await.map_err(to_graphql_error)? {
            return Err(to_graphql_error(ApiError::not_found("profile", id)));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberTypeId as DbMemberTypeId;

    #[test]
    fn test_create_input_converts_tier() {
        let input = CreateProfileInput {
            is_male: false,
            year_of_birth: 1990,
            user_id: Uuid::nil(),
            member_type_id: MemberTypeId::Business,
        };

        let profile = input.validate().unwrap();
        assert_eq!(profile.member_type_id, DbMemberTypeId::Business);
    }

    #[test]
    fn test_change_input_rejects_year_out_of_range() {
        let input = ChangeProfileInput {
            year_of_birth: Some(1850),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }
}
