//! Posts-by-author DataLoader
//!
//! Batches loading of all posts for multiple authors into a single store
//! call. Authors without posts resolve to an empty list.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::group_by;
use crate::models::Post;
use crate::repositories::{SharedStore, StoreError};

/// DataLoader for loading posts by author ID
#[derive(Clone)]
pub struct PostsByAuthorLoader {
    store: SharedStore,
}

impl PostsByAuthorLoader {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl Loader<Uuid> for PostsByAuthorLoader {
    type Value = Vec<Post>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        debug!(keys = keys.len(), "Loading posts by author");

        let posts = self
            .store
            .find_posts_by_author_ids(keys)
            .await
            .map_err(Arc::new)?;

        Ok(group_by(keys, posts, |p| p.author_id))
    }
}
