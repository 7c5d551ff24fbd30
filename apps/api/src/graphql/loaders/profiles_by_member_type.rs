//! Profiles-by-member-type DataLoader
//!
//! Collection loader: every profile on a tier, grouped by tier id.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::group_by;
use crate::models::{MemberTypeId, Profile};
use crate::repositories::{SharedStore, StoreError};

/// DataLoader for loading the profiles on each membership tier
#[derive(Clone)]
pub struct ProfilesByMemberTypeLoader {
    store: SharedStore,
}

impl ProfilesByMemberTypeLoader {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl Loader<MemberTypeId> for ProfilesByMemberTypeLoader {
    type Value = Vec<Profile>;
    type Error = Arc<StoreError>;

    async fn load(
        &self,
        keys: &[MemberTypeId],
    ) -> Result<HashMap<MemberTypeId, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        debug!(keys = keys.len(), "Loading profiles by member type");

        let profiles = self
            .store
            .find_profiles_by_member_type_ids(keys)
            .await
            .map_err(Arc::new)?;

        Ok(group_by(keys, profiles, |p| p.member_type_id))
    }
}
