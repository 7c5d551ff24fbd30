//! PostgreSQL store backend
//!
//! `PgStore` wraps a sqlx connection pool. The per-collection trait
//! implementations live next to each other in `user.rs`, `profile.rs`,
//! `post.rs`, `member_type.rs` and `subscription.rs`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Store, StoreResult};

/// Store backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    pub(super) pool: PgPool,
}

impl PgStore {
    /// Create a new PgStore over an established pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
