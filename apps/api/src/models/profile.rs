//! Profile model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::MemberTypeId;

/// Profile record from the profiles table
///
/// Each user owns at most one profile (`user_id` is unique).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Profile {
    /// Unique profile identifier
    pub id: Uuid,

    /// Gender flag
    pub is_male: bool,

    /// Year of birth
    pub year_of_birth: i32,

    /// Owning user
    pub user_id: Uuid,

    /// Membership tier
    pub member_type_id: MemberTypeId,
}

/// Profile creation input
#[derive(Debug, Clone, Deserialize)]
pub struct NewProfile {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

/// Partial profile update; the owning user cannot be changed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileChanges {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl ProfileChanges {
    /// True when no column would change
    pub fn is_empty(&self) -> bool {
        self.is_male.is_none() && self.year_of_birth.is_none() && self.member_type_id.is_none()
    }

    /// Apply the changes to an in-memory record
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(is_male) = self.is_male {
            profile.is_male = is_male;
        }
        if let Some(year_of_birth) = self.year_of_birth {
            profile.year_of_birth = year_of_birth;
        }
        if let Some(member_type_id) = self.member_type_id {
            profile.member_type_id = member_type_id;
        }
    }
}
