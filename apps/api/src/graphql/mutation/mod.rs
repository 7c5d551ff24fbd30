//! GraphQL mutations for Quill
//!
//! This module contains all mutation resolvers, organized by entity, plus
//! the input validation they share.

mod post;
mod profile;
mod subscription;
mod user;

pub use post::{ChangePostInput, CreatePostInput, PostMutation};
pub use profile::{ChangeProfileInput, CreateProfileInput, ProfileMutation};
pub use subscription::SubscriptionMutation;
pub use user::{ChangeUserInput, CreateUserInput, UserMutation};

use std::ops::RangeInclusive;

use async_graphql::MergedObject;

use crate::error::{ApiError, ApiResult};

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(
    UserMutation,
    ProfileMutation,
    PostMutation,
    SubscriptionMutation,
);

// =============================================================================
// Input Validation
// =============================================================================

/// Accepted years of birth
const YEAR_OF_BIRTH_RANGE: RangeInclusive<i32> = 1900..=2100;

/// Trim a required text field, rejecting blank values
fn require_text(field: &str, value: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn require_finite(field: &str, value: f64) -> ApiResult<f64> {
    if !value.is_finite() {
        return Err(ApiError::validation(format!("{} must be a finite number", field)));
    }
    Ok(value)
}

fn require_year_of_birth(value: i32) -> ApiResult<i32> {
    if !YEAR_OF_BIRTH_RANGE.contains(&value) {
        return Err(ApiError::validation(format!(
            "yearOfBirth must be between {} and {}",
            YEAR_OF_BIRTH_RANGE.start(),
            YEAR_OF_BIRTH_RANGE.end()
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("name", "  Ada ").unwrap(), "Ada");
        assert_matches!(require_text("name", "   "), Err(ApiError::ValidationError(msg)) if msg == "name must not be empty");
    }

    #[test]
    fn test_require_finite() {
        assert_eq!(require_finite("balance", -3.5).unwrap(), -3.5);
        assert!(require_finite("balance", f64::NAN).is_err());
        assert!(require_finite("balance", f64::INFINITY).is_err());
    }

    #[test]
    fn test_year_of_birth_bounds() {
        assert!(require_year_of_birth(1900).is_ok());
        assert!(require_year_of_birth(2100).is_ok());
        assert!(require_year_of_birth(1899).is_err());
        assert!(require_year_of_birth(2101).is_err());
    }
}
