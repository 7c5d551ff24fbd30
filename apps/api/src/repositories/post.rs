//! Post queries for the PostgreSQL store

use async_trait::async_trait;
use uuid::Uuid;

use super::postgres::PgStore;
use super::utils::POST_COLUMNS;
use super::{PostStore, StoreResult};
use crate::models::{NewPost, Post, PostChanges};

#[async_trait]
impl PostStore for PgStore {
    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let sql = format!("SELECT {} FROM posts ORDER BY id ASC", POST_COLUMNS);
        Ok(sqlx::query_as::<_, Post>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_post(&self, id: Uuid) -> StoreResult<Option<Post>> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_posts_by_author_ids(&self, author_ids: &[Uuid]) -> StoreResult<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts WHERE author_id = ANY($1) ORDER BY id ASC",
            POST_COLUMNS
        );
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_post(&self, input: NewPost) -> StoreResult<Post> {
        let sql = format!(
            "INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3) RETURNING {}",
            POST_COLUMNS
        );
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(input.title)
            .bind(input.content)
            .bind(input.author_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_post(&self, id: Uuid, changes: PostChanges) -> StoreResult<Option<Post>> {
        let sql = format!(
            r#"UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content)
            WHERE id = $1
            RETURNING {}"#,
            POST_COLUMNS
        );
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.content)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
