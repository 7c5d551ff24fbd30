//! Post model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Post record from the posts table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Post {
    /// Unique post identifier
    pub id: Uuid,

    /// Post title
    pub title: String,

    /// Post body
    pub content: String,

    /// Author (user) of the post
    pub author_id: Uuid,
}

/// Post creation input
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

/// Partial post update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    /// True when no column would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Apply the changes to an in-memory record
    pub fn apply(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
    }
}
