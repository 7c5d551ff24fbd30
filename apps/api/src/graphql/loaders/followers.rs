//! Followers DataLoader
//!
//! Keyed by author id; resolves to the users subscribed to that author.
//! The reverse direction lives in [`super::FollowingLoader`].

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::group_by;
use crate::models::User;
use crate::repositories::{SharedStore, StoreError};

/// DataLoader for the subscribers of each author
#[derive(Clone)]
pub struct FollowersLoader {
    store: SharedStore,
}

impl FollowersLoader {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl Loader<Uuid> for FollowersLoader {
    type Value = Vec<User>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        debug!(keys = keys.len(), "Loading subscribers of authors");

        let edges = self
            .store
            .find_subscribers_of(keys)
            .await
            .map_err(Arc::new)?;

        Ok(group_by(keys, edges, |e| e.pivot_id)
            .into_iter()
            .map(|(author_id, edges)| (author_id, edges.into_iter().map(|e| e.user).collect()))
            .collect())
    }
}
