//! Subscription edge model

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Row of the subscribers_on_authors table: `subscriber_id` follows `author_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRow, Serialize)]
pub struct Subscription {
    /// The following user
    pub subscriber_id: Uuid,

    /// The followed user
    pub author_id: Uuid,
}

impl Subscription {
    pub fn new(subscriber_id: Uuid, author_id: Uuid) -> Self {
        Self {
            subscriber_id,
            author_id,
        }
    }
}
