//! Following DataLoader
//!
//! Keyed by subscriber id; resolves to the authors that user is subscribed to.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::group_by;
use crate::models::User;
use crate::repositories::{SharedStore, StoreError};

/// DataLoader for the authors each user follows
#[derive(Clone)]
pub struct FollowingLoader {
    store: SharedStore,
}

impl FollowingLoader {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl Loader<Uuid> for FollowingLoader {
    type Value = Vec<User>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        debug!(keys = keys.len(), "Loading authors followed by users");

        let edges = self
            .store
            .find_authors_followed_by(keys)
            .await
            .map_err(Arc::new)?;

        Ok(group_by(keys, edges, |e| e.pivot_id)
            .into_iter()
            .map(|(subscriber_id, edges)| {
                (subscriber_id, edges.into_iter().map(|e| e.user).collect())
            })
            .collect())
    }
}
