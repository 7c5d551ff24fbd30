//! Member type (membership tier) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Membership tier identifier matching PostgreSQL member_type_id
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "member_type_id", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberTypeId {
    Basic,
    Business,
}

impl MemberTypeId {
    /// Every tier, in ascending order
    pub const ALL: [MemberTypeId; 2] = [MemberTypeId::Basic, MemberTypeId::Business];

    /// Database label of the tier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Business => "business",
        }
    }
}

impl std::fmt::Display for MemberTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member type record from the member_types table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct MemberType {
    /// Tier identifier
    pub id: MemberTypeId,

    /// Discount percentage granted to members of this tier
    pub discount: f64,

    /// Monthly post allowance
    pub posts_limit_per_month: i32,
}

impl MemberType {
    /// The tiers seeded by the initial migration
    pub fn seeded() -> Vec<MemberType> {
        vec![
            MemberType {
                id: MemberTypeId::Basic,
                discount: 2.3,
                posts_limit_per_month: 20,
            },
            MemberType {
                id: MemberTypeId::Business,
                discount: 7.7,
                posts_limit_per_month: 100,
            },
        ]
    }
}
