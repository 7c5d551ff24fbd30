//! Request-scoped batched loaders
//!
//! Each loader batches the single-key lookups issued by sibling resolvers into
//! one bulk store call and memoizes the results for the rest of the request.
//! A fresh [`Loaders`] registry is built for every incoming request and
//! attached to that request only, so caches and pending batches never cross
//! request boundaries.
//!
//! There are two kinds of loaders:
//! - Scalar loaders: at most one record per key; a miss resolves to `None`
//! - Collection loaders: zero or more records per key; a miss resolves to an
//!   empty list
//!
//! Both kinds answer every requested key, misses included. `DataLoader` only
//! caches the keys present in a batch result, so a key left out would be
//! sent to the store again on its next load.
//!
//! Batching is done by async-graphql's `DataLoader`: the first key queued in
//! an empty batch spawns a dispatch task that waits for the configured delay,
//! and every key queued before it fires joins the same bulk call.

mod followers;
mod following;
mod member_type;
mod posts_by_author;
mod profile_by_user;
mod profiles_by_member_type;
mod user;

pub use followers::FollowersLoader;
pub use following::FollowingLoader;
pub use member_type::MemberTypeLoader;
pub use posts_by_author::PostsByAuthorLoader;
pub use profile_by_user::ProfileByUserLoader;
pub use profiles_by_member_type::ProfilesByMemberTypeLoader;
pub use user::UserLoader;

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use async_graphql::dataloader::{DataLoader, HashMapCache, Loader};

use crate::repositories::SharedStore;

/// A loader wrapped with batching and a per-request cache
pub type BatchLoader<L> = DataLoader<L, HashMapCache>;

/// Batching parameters shared by every loader of a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderSettings {
    /// How long a batch stays open after its first key is queued
    pub delay: Duration,
    /// A batch holding this many keys is dispatched immediately
    pub max_batch_size: usize,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1),
            max_batch_size: 1000,
        }
    }
}

/// Every loader the schema resolves relationships through
///
/// Built once per request by [`Loaders::new`]; never stored in schema data.
pub struct Loaders {
    /// User by id (scalar)
    pub users: BatchLoader<UserLoader>,
    /// Profile by owning user id (scalar)
    pub profile_by_user: BatchLoader<ProfileByUserLoader>,
    /// Posts by author id (collection)
    pub posts_by_author: BatchLoader<PostsByAuthorLoader>,
    /// Member type by id (scalar)
    pub member_types: BatchLoader<MemberTypeLoader>,
    /// Profiles by member type id (collection)
    pub profiles_by_member_type: BatchLoader<ProfilesByMemberTypeLoader>,
    /// Users subscribed to a user (collection)
    pub followers: BatchLoader<FollowersLoader>,
    /// Users a user is subscribed to (collection)
    pub following: BatchLoader<FollowingLoader>,
}

impl Loaders {
    /// Create a fresh registry with empty caches
    pub fn new(store: SharedStore, settings: LoaderSettings) -> Self {
        Self {
            users: batch_loader(UserLoader::new(store.clone()), settings),
            profile_by_user: batch_loader(ProfileByUserLoader::new(store.clone()), settings),
            posts_by_author: batch_loader(PostsByAuthorLoader::new(store.clone()), settings),
            member_types: batch_loader(MemberTypeLoader::new(store.clone()), settings),
            profiles_by_member_type: batch_loader(
                ProfilesByMemberTypeLoader::new(store.clone()),
                settings,
            ),
            followers: batch_loader(FollowersLoader::new(store.clone()), settings),
            following: batch_loader(FollowingLoader::new(store), settings),
        }
    }
}

fn batch_loader<L>(loader: L, settings: LoaderSettings) -> BatchLoader<L>
where
    L: Send + Sync + 'static,
{
    DataLoader::with_cache(loader, tokio::spawn, HashMapCache::default())
        .delay(settings.delay)
        .max_batch_size(settings.max_batch_size)
}

/// Load several keys and return the values in the order the keys were given
///
/// The underlying batch returns a map; this re-projects it onto `keys`, so the
/// i-th element always belongs to `keys[i]`. Repeated keys yield repeated
/// values; keys without a record yield the miss value (`None` or empty).
pub async fn load_ordered<K, L>(
    loader: &BatchLoader<L>,
    keys: &[K],
) -> Result<Vec<L::Value>, L::Error>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
    L::Value: Default,
{
    let found = loader.load_many(keys.iter().cloned()).await?;
    Ok(keys
        .iter()
        .map(|key| found.get(key).cloned().unwrap_or_default())
        .collect())
}

/// Index scalar rows by key, giving every requested key an entry. When the
/// store returns several rows for one key the first one wins.
pub(crate) fn index_by<K, V>(
    keys: &[K],
    rows: Vec<V>,
    key_of: impl Fn(&V) -> K,
) -> HashMap<K, Option<V>>
where
    K: Hash + Eq + Clone,
{
    let mut result: HashMap<K, Option<V>> = keys.iter().map(|k| (k.clone(), None)).collect();
    for row in rows {
        // rows for keys that were not asked for are dropped
        if let Some(slot) = result.get_mut(&key_of(&row)) {
            if slot.is_none() {
                *slot = Some(row);
            }
        }
    }
    result
}

/// Group collection rows by key, giving every requested key an entry
pub(crate) fn group_by<K, V>(
    keys: &[K],
    rows: Vec<V>,
    key_of: impl Fn(&V) -> K,
) -> HashMap<K, Vec<V>>
where
    K: Hash + Eq + Clone,
{
    let mut result: HashMap<K, Vec<V>> = keys.iter().map(|k| (k.clone(), Vec::new())).collect();
    for row in rows {
        let key = key_of(&row);
        // rows for keys that were not asked for are dropped
        if let Some(bucket) = result.get_mut(&key) {
            bucket.push(row);
        }
    }
    result
}
