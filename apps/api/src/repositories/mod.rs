//! Data access layer for Quill
//!
//! Every read and write the API performs goes through the [`Store`] traits.
//! Per collection they offer bulk lookup by a key set (what the GraphQL
//! loaders batch into), single lookup, create, update and delete.
//!
//! Two backends implement them:
//! - [`PgStore`]: PostgreSQL through a sqlx connection pool
//! - [`MemoryStore`]: in-process tables for tests

pub mod member_type;
pub mod memory;
pub mod post;
pub mod postgres;
pub mod profile;
pub mod subscription;
pub mod user;
pub mod utils;

pub use memory::{LoggedOperation, MemoryStore};
pub use postgres::PgStore;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    MemberType, MemberTypeId, NewPost, NewProfile, NewUser, Post, PostChanges, Profile,
    ProfileChanges, Subscription, User, UserChanges,
};

/// Errors surfaced by a store backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("conflict: {0}")]
    Conflict(String),

    /// The write references a row that does not exist
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// The backend could not be reached (pool exhausted, connection lost)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::Conflict(
                db_err
                    .constraint()
                    .unwrap_or("unique constraint")
                    .to_string(),
            ),
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                Self::InvalidReference(
                    db_err
                        .constraint()
                        .unwrap_or("foreign key constraint")
                        .to_string(),
                )
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(err.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Shared handle to the configured backend
pub type SharedStore = Arc<dyn Store>;

/// User collection
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Single user by key
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Bulk lookup: every user whose id is in `ids`, in no particular order
    async fn find_users_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<User>>;

    async fn create_user(&self, input: NewUser) -> StoreResult<User>;

    /// Returns `None` when no user has the id
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>>;

    /// Deletes the user together with their profile, posts and edges.
    /// Returns false when no user has the id.
    async fn delete_user(&self, id: Uuid) -> StoreResult<bool>;
}

/// Profile collection
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn list_profiles(&self) -> StoreResult<Vec<Profile>>;

    async fn find_profile(&self, id: Uuid) -> StoreResult<Option<Profile>>;

    /// Bulk lookup by owning user
    async fn find_profiles_by_user_ids(&self, user_ids: &[Uuid]) -> StoreResult<Vec<Profile>>;

    /// Bulk lookup by membership tier
    async fn find_profiles_by_member_type_ids(
        &self,
        member_type_ids: &[MemberTypeId],
    ) -> StoreResult<Vec<Profile>>;

    /// Fails with [`StoreError::Conflict`] if the user already has a profile and
    /// [`StoreError::InvalidReference`] if the user does not exist
    async fn create_profile(&self, input: NewProfile) -> StoreResult<Profile>;

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> StoreResult<Option<Profile>>;

    async fn delete_profile(&self, id: Uuid) -> StoreResult<bool>;
}

/// Post collection
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn list_posts(&self) -> StoreResult<Vec<Post>>;

    async fn find_post(&self, id: Uuid) -> StoreResult<Option<Post>>;

    /// Bulk lookup by author
    async fn find_posts_by_author_ids(&self, author_ids: &[Uuid]) -> StoreResult<Vec<Post>>;

    /// Fails with [`StoreError::InvalidReference`] if the author does not exist
    async fn create_post(&self, input: NewPost) -> StoreResult<Post>;

    async fn update_post(&self, id: Uuid, changes: PostChanges) -> StoreResult<Option<Post>>;

    async fn delete_post(&self, id: Uuid) -> StoreResult<bool>;
}

/// Membership tiers (read-only)
#[async_trait]
pub trait MemberTypeStore: Send + Sync {
    async fn list_member_types(&self) -> StoreResult<Vec<MemberType>>;

    async fn find_member_type(&self, id: MemberTypeId) -> StoreResult<Option<MemberType>>;

    /// Bulk lookup by tier id
    async fn find_member_types_by_ids(
        &self,
        ids: &[MemberTypeId],
    ) -> StoreResult<Vec<MemberType>>;
}

/// A user reached through a subscription edge, tagged with the user on the
/// other end of the edge (the key the lookup was made with)
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeUser {
    /// The user the lookup pivoted on
    pub pivot_id: Uuid,
    /// The user on the far side of the edge
    pub user: User,
}

/// Subscription edges between users
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Followers: for every author in `author_ids`, the users subscribed to them.
    /// `pivot_id` of each result is the author.
    async fn find_subscribers_of(&self, author_ids: &[Uuid]) -> StoreResult<Vec<EdgeUser>>;

    /// Following: for every subscriber in `subscriber_ids`, the authors they follow.
    /// `pivot_id` of each result is the subscriber.
    async fn find_authors_followed_by(
        &self,
        subscriber_ids: &[Uuid],
    ) -> StoreResult<Vec<EdgeUser>>;

    /// Insert the edge; inserting an existing edge is a no-op
    async fn subscribe(&self, edge: Subscription) -> StoreResult<()>;

    /// Remove the edge; returns false when it did not exist
    async fn unsubscribe(&self, edge: Subscription) -> StoreResult<bool>;
}

/// The complete backend used by the API
#[async_trait]
pub trait Store:
    UserStore + ProfileStore + PostStore + MemberTypeStore + SubscriptionStore + 'static
{
    /// Cheap connectivity check used by the readiness probe
    async fn ping(&self) -> StoreResult<()>;
}
