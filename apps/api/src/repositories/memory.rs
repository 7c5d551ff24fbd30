//! In-memory store backend
//!
//! Keeps every collection in process memory behind a single lock. Backs the
//! test suite; the server itself always runs on [`PgStore`](super::PgStore).
//! The operation log is never truncated except by [`MemoryStore::clear_log`].
//!
//! The store records every operation it serves in an operation log, so the
//! number of bulk lookups a GraphQL request triggered can be inspected the
//! same way one would read a SQL query log.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::{
    EdgeUser, MemberTypeStore, PostStore, ProfileStore, Store, StoreError, StoreResult,
    SubscriptionStore, UserStore,
};
use crate::models::{
    MemberType, MemberTypeId, NewPost, NewProfile, NewUser, Post, PostChanges, Profile,
    ProfileChanges, Subscription, User, UserChanges,
};

/// One operation served by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedOperation {
    /// Trait method name, e.g. `find_posts_by_author_ids`
    pub name: &'static str,
    /// Keys the operation was called with, rendered as strings
    pub keys: Vec<String>,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<Profile>,
    posts: Vec<Post>,
    member_types: Vec<MemberType>,
    subscriptions: Vec<Subscription>,
}

impl Tables {
    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

/// Store keeping all rows in memory
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    log: Mutex<Vec<LoggedOperation>>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store seeded with the membership tiers
    pub fn new() -> Self {
        Self::with_member_types(MemberType::seeded())
    }

    /// Create an empty store holding only the given membership tiers
    pub fn with_member_types(member_types: Vec<MemberType>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                member_types,
                ..Tables::default()
            }),
            log: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Every operation served since creation or the last [`clear_log`](Self::clear_log)
    pub fn operations(&self) -> Vec<LoggedOperation> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of logged calls to the named operation
    pub fn operation_count(&self, name: &str) -> usize {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|op| op.name == name)
            .count()
    }

    pub fn clear_log(&self) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Simulate losing (or regaining) the backend. While unavailable every
    /// operation fails with [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn record<K: ToString>(&self, name: &'static str, keys: &[K]) -> StoreResult<()> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LoggedOperation {
                name,
                keys: keys.iter().map(ToString::to_string).collect(),
            });

        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "in-memory store switched off".to_string(),
            ))
        }
    }

    fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        f(&tables)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut tables)
    }
}

const NO_KEYS: [Uuid; 0] = [];

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.record("list_users", &NO_KEYS)?;
        Ok(self.read(|t| t.users.clone()))
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        self.record("find_user", &[id])?;
        Ok(self.read(|t| t.user(id).cloned()))
    }

    async fn find_users_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<User>> {
        self.record("find_users_by_ids", ids)?;
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        Ok(self.read(|t| {
            t.users
                .iter()
                .filter(|u| wanted.contains(&u.id))
                .cloned()
                .collect()
        }))
    }

    async fn create_user(&self, input: NewUser) -> StoreResult<User> {
        self.record("create_user", &NO_KEYS)?;
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            balance: input.balance,
        };
        self.write(|t| t.users.push(user.clone()));
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>> {
        self.record("update_user", &[id])?;
        Ok(self.write(|t| {
            t.users.iter_mut().find(|u| u.id == id).map(|user| {
                changes.apply(user);
                user.clone()
            })
        }))
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        self.record("delete_user", &[id])?;
        Ok(self.write(|t| {
            let before = t.users.len();
            t.users.retain(|u| u.id != id);
            if t.users.len() == before {
                return false;
            }
            t.profiles.retain(|p| p.user_id != id);
            t.posts.retain(|p| p.author_id != id);
            t.subscriptions
                .retain(|s| s.subscriber_id != id && s.author_id != id);
            true
        }))
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn list_profiles(&self) -> StoreResult<Vec<Profile>> {
        self.record("list_profiles", &NO_KEYS)?;
        Ok(self.read(|t| t.profiles.clone()))
    }

    async fn find_profile(&self, id: Uuid) -> StoreResult<Option<Profile>> {
        self.record("find_profile", &[id])?;
        Ok(self.read(|t| t.profiles.iter().find(|p| p.id == id).cloned()))
    }

    async fn find_profiles_by_user_ids(&self, user_ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        self.record("find_profiles_by_user_ids", user_ids)?;
        let wanted: HashSet<&Uuid> = user_ids.iter().collect();
        Ok(self.read(|t| {
            t.profiles
                .iter()
                .filter(|p| wanted.contains(&p.user_id))
                .cloned()
                .collect()
        }))
    }

    async fn find_profiles_by_member_type_ids(
        &self,
        member_type_ids: &[MemberTypeId],
    ) -> StoreResult<Vec<Profile>> {
        self.record("find_profiles_by_member_type_ids", member_type_ids)?;
        Ok(self.read(|t| {
            t.profiles
                .iter()
                .filter(|p| member_type_ids.contains(&p.member_type_id))
                .cloned()
                .collect()
        }))
    }

    async fn create_profile(&self, input: NewProfile) -> StoreResult<Profile> {
        self.record("create_profile", &[input.user_id])?;
        self.write(|t| {
            if t.user(input.user_id).is_none() {
                return Err(StoreError::InvalidReference(format!(
                    "user {}",
                    input.user_id
                )));
            }
            if t.profiles.iter().any(|p| p.user_id == input.user_id) {
                return Err(StoreError::Conflict(format!(
                    "profile for user {}",
                    input.user_id
                )));
            }
            let profile = Profile {
                id: Uuid::new_v4(),
                is_male: input.is_male,
                year_of_birth: input.year_of_birth,
                user_id: input.user_id,
                member_type_id: input.member_type_id,
            };
            t.profiles.push(profile.clone());
            Ok(profile)
        })
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> StoreResult<Option<Profile>> {
        self.record("update_profile", &[id])?;
        Ok(self.write(|t| {
            t.profiles.iter_mut().find(|p| p.id == id).map(|profile| {
                changes.apply(profile);
                profile.clone()
            })
        }))
    }

    async fn delete_profile(&self, id: Uuid) -> StoreResult<bool> {
        self.record("delete_profile", &[id])?;
        Ok(self.write(|t| {
            let before = t.profiles.len();
            t.profiles.retain(|p| p.id != id);
            t.profiles.len() != before
        }))
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        self.record("list_posts", &NO_KEYS)?;
        Ok(self.read(|t| t.posts.clone()))
    }

    async fn find_post(&self, id: Uuid) -> StoreResult<Option<Post>> {
        self.record("find_post", &[id])?;
        Ok(self.read(|t| t.posts.iter().find(|p| p.id == id).cloned()))
    }

    async fn find_posts_by_author_ids(&self, author_ids: &[Uuid]) -> StoreResult<Vec<Post>> {
        self.record("find_posts_by_author_ids", author_ids)?;
        let wanted: HashSet<&Uuid> = author_ids.iter().collect();
        Ok(self.read(|t| {
            t.posts
                .iter()
                .filter(|p| wanted.contains(&p.author_id))
                .cloned()
                .collect()
        }))
    }

    async fn create_post(&self, input: NewPost) -> StoreResult<Post> {
        self.record("create_post", &[input.author_id])?;
        self.write(|t| {
            if t.user(input.author_id).is_none() {
                return Err(StoreError::InvalidReference(format!(
                    "user {}",
                    input.author_id
                )));
            }
            let post = Post {
                id: Uuid::new_v4(),
                title: input.title,
                content: input.content,
                author_id: input.author_id,
            };
            t.posts.push(post.clone());
            Ok(post)
        })
    }

    async fn update_post(&self, id: Uuid, changes: PostChanges) -> StoreResult<Option<Post>> {
        self.record("update_post", &[id])?;
        Ok(self.write(|t| {
            t.posts.iter_mut().find(|p| p.id == id).map(|post| {
                changes.apply(post);
                post.clone()
            })
        }))
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<bool> {
        self.record("delete_post", &[id])?;
        Ok(self.write(|t| {
            let before = t.posts.len();
            t.posts.retain(|p| p.id != id);
            t.posts.len() != before
        }))
    }
}

#[async_trait]
impl MemberTypeStore for MemoryStore {
    async fn list_member_types(&self) -> StoreResult<Vec<MemberType>> {
        self.record("list_member_types", &NO_KEYS)?;
        Ok(self.read(|t| t.member_types.clone()))
    }

    async fn find_member_type(&self, id: MemberTypeId) -> StoreResult<Option<MemberType>> {
        self.record("find_member_type", &[id])?;
        Ok(self.read(|t| t.member_types.iter().find(|m| m.id == id).cloned()))
    }

    async fn find_member_types_by_ids(
        &self,
        ids: &[MemberTypeId],
    ) -> StoreResult<Vec<MemberType>> {
        self.record("find_member_types_by_ids", ids)?;
        Ok(self.read(|t| {
            t.member_types
                .iter()
                .filter(|m| ids.contains(&m.id))
                .cloned()
                .collect()
        }))
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn find_subscribers_of(&self, author_ids: &[Uuid]) -> StoreResult<Vec<EdgeUser>> {
        self.record("find_subscribers_of", author_ids)?;
        let wanted: HashSet<&Uuid> = author_ids.iter().collect();
        Ok(self.read(|t| {
            t.subscriptions
                .iter()
                .filter(|s| wanted.contains(&s.author_id))
                .filter_map(|s| {
                    t.user(s.subscriber_id).map(|user| EdgeUser {
                        pivot_id: s.author_id,
                        user: user.clone(),
                    })
                })
                .collect()
        }))
    }

    async fn find_authors_followed_by(
        &self,
        subscriber_ids: &[Uuid],
    ) -> StoreResult<Vec<EdgeUser>> {
        self.record("find_authors_followed_by", subscriber_ids)?;
        let wanted: HashSet<&Uuid> = subscriber_ids.iter().collect();
        Ok(self.read(|t| {
            t.subscriptions
                .iter()
                .filter(|s| wanted.contains(&s.subscriber_id))
                .filter_map(|s| {
                    t.user(s.author_id).map(|user| EdgeUser {
                        pivot_id: s.subscriber_id,
                        user: user.clone(),
                    })
                })
                .collect()
        }))
    }

    async fn subscribe(&self, edge: Subscription) -> StoreResult<()> {
        self.record("subscribe", &[edge.subscriber_id, edge.author_id])?;
        self.write(|t| {
            for id in [edge.subscriber_id, edge.author_id] {
                if t.user(id).is_none() {
                    return Err(StoreError::InvalidReference(format!("user {}", id)));
                }
            }
            if !t.subscriptions.contains(&edge) {
                t.subscriptions.push(edge);
            }
            Ok(())
        })
    }

    async fn unsubscribe(&self, edge: Subscription) -> StoreResult<bool> {
        self.record("unsubscribe", &[edge.subscriber_id, edge.author_id])?;
        Ok(self.write(|t| {
            let before = t.subscriptions.len();
            t.subscriptions.retain(|s| *s != edge);
            t.subscriptions.len() != before
        }))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.record("ping", &NO_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            balance: 0.0,
        }
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let store = MemoryStore::new();
        let alice = store.create_user(new_user("alice")).await.unwrap();
        let bob = store.create_user(new_user("bob")).await.unwrap();
        store
            .create_post(NewPost {
                title: "hello".to_string(),
                content: "world".to_string(),
                author_id: alice.id,
            })
            .await
            .unwrap();
        store
            .subscribe(Subscription::new(bob.id, alice.id))
            .await
            .unwrap();

        assert!(store.delete_user(alice.id).await.unwrap());

        assert!(store.list_posts().await.unwrap().is_empty());
        assert!(store
            .find_authors_followed_by(&[bob.id])
            .await
            .unwrap()
            .is_empty());
        assert!(!store.delete_user(alice.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_second_profile_for_user_conflicts() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("carol")).await.unwrap();
        let input = NewProfile {
            is_male: false,
            year_of_birth: 1990,
            user_id: user.id,
            member_type_id: MemberTypeId::Basic,
        };

        store.create_profile(input.clone()).await.unwrap();
        let result = store.create_profile(input).await;

        assert_matches!(result, Err(StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_post_for_unknown_author_is_rejected() {
        let store = MemoryStore::new();
        let result = store
            .create_post(NewPost {
                title: "orphan".to_string(),
                content: String::new(),
                author_id: Uuid::new_v4(),
            })
            .await;

        assert_matches!(result, Err(StoreError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_subscribe_is_idempotent() {
        let store = MemoryStore::new();
        let a = store.create_user(new_user("a")).await.unwrap();
        let b = store.create_user(new_user("b")).await.unwrap();

        store.subscribe(Subscription::new(a.id, b.id)).await.unwrap();
        store.subscribe(Subscription::new(a.id, b.id)).await.unwrap();

        assert_eq!(store.find_subscribers_of(&[b.id]).await.unwrap().len(), 1);
        assert!(store.unsubscribe(Subscription::new(a.id, b.id)).await.unwrap());
        assert!(!store.unsubscribe(Subscription::new(a.id, b.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_and_logs() {
        let store = MemoryStore::new();
        store.set_available(false);

        let result = store.find_users_by_ids(&[Uuid::new_v4()]).await;

        assert_matches!(result, Err(StoreError::Unavailable(_)));
        assert_eq!(store.operation_count("find_users_by_ids"), 1);
        assert_eq!(store.operations()[0].keys.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_log_empties_operation_log() {
        let store = MemoryStore::new();
        store.create_user(new_user("dave")).await.unwrap();
        store.list_users().await.unwrap();
        assert_eq!(store.operations().len(), 2);

        store.clear_log();

        assert!(store.operations().is_empty());
        store.list_users().await.unwrap();
        assert_eq!(store.operation_count("list_users"), 1);
    }
}
