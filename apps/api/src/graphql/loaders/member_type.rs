//! Member type DataLoader

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::index_by;
use crate::models::{MemberType, MemberTypeId};
use crate::repositories::{SharedStore, StoreError};

/// DataLoader for batching membership tier queries
#[derive(Clone)]
pub struct MemberTypeLoader {
    store: SharedStore,
}

impl MemberTypeLoader {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl Loader<MemberTypeId> for MemberTypeLoader {
    type Value = Option<MemberType>;
    type Error = Arc<StoreError>;

    async fn load(
        &self,
        keys: &[MemberTypeId],
    ) -> Result<HashMap<MemberTypeId, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        debug!(keys = keys.len(), "Loading member types");

        let member_types = self
            .store
            .find_member_types_by_ids(keys)
            .await
            .map_err(Arc::new)?;

        Ok(index_by(keys, member_types, |m| m.id))
    }
}
