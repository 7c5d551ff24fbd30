//! Profile-by-user DataLoader
//!
//! A user owns at most one profile, so this is a scalar loader keyed by the
//! owning user's id.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::index_by;
use crate::models::Profile;
use crate::repositories::{SharedStore, StoreError};

/// DataLoader for loading the profile of each user
#[derive(Clone)]
pub struct ProfileByUserLoader {
    store: SharedStore,
}

impl ProfileByUserLoader {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl Loader<Uuid> for ProfileByUserLoader {
    type Value = Option<Profile>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        debug!(keys = keys.len(), "Loading profiles by user");

        let profiles = self
            .store
            .find_profiles_by_user_ids(keys)
            .await
            .map_err(Arc::new)?;

        Ok(index_by(keys, profiles, |p| p.user_id))
    }
}
