//! User DataLoader for batched fetching
//!
//! Batches user id lookups into a single store call. Used wherever a user is
//! reached through a foreign key (post author, profile owner).

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::index_by;
use crate::models::User;
use crate::repositories::{SharedStore, StoreError};

/// DataLoader for batching user queries
#[derive(Clone)]
pub struct UserLoader {
    store: SharedStore,
}

impl UserLoader {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl Loader<Uuid> for UserLoader {
    type Value = Option<User>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        debug!(keys = keys.len(), "Loading users");

        let users = self.store.find_users_by_ids(keys).await.map_err(Arc::new)?;

        Ok(index_by(keys, users, |u| u.id))
    }
}
