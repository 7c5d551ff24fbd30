//! Shared helpers for the PostgreSQL repositories

use crate::models::MemberTypeId;

// ============================================================================
// SQL Column Constants
//
// SELECT column lists for each entity, kept in one place so every query
// decodes into the same `FromRow` shape.
// ============================================================================

/// SQL columns for user queries
pub const USER_COLUMNS: &str = "id, name, balance";

/// SQL columns for user queries joined through an alias `u`
pub const USER_COLUMNS_U: &str = "u.id, u.name, u.balance";

/// SQL columns for profile queries
pub const PROFILE_COLUMNS: &str = "id, is_male, year_of_birth, user_id, member_type_id";

/// SQL columns for post queries
pub const POST_COLUMNS: &str = "id, title, content, author_id";

/// SQL columns for member type queries
pub const MEMBER_TYPE_COLUMNS: &str = "id, discount, posts_limit_per_month";

/// Text labels for a set of tier ids.
///
/// Tier ids are compared as text (`member_type_id::text = ANY($1)`) so the
/// bind does not depend on the enum's array type being registered.
pub fn member_type_labels(ids: &[MemberTypeId]) -> Vec<&'static str> {
    ids.iter().map(MemberTypeId::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_type_labels() {
        assert_eq!(
            member_type_labels(&[MemberTypeId::Business, MemberTypeId::Basic]),
            vec!["business", "basic"]
        );
    }
}
