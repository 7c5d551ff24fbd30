//! Subscription edge queries for the PostgreSQL store
//!
//! Edges live in `subscribers_on_authors (subscriber_id, author_id)`. The two
//! lookups join the edge table to `users` from opposite ends and return the
//! key they pivoted on as `pivot_id`.

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::postgres::PgStore;
use super::utils::USER_COLUMNS_U;
use super::{EdgeUser, StoreResult, SubscriptionStore};
use crate::models::{Subscription, User};

#[derive(FromRow)]
struct EdgeUserRow {
    pivot_id: Uuid,
    #[sqlx(flatten)]
    user: User,
}

impl From<EdgeUserRow> for EdgeUser {
    fn from(row: EdgeUserRow) -> Self {
        Self {
            pivot_id: row.pivot_id,
            user: row.user,
        }
    }
}

#[async_trait]
impl SubscriptionStore for PgStore {
    async fn find_subscribers_of(&self, author_ids: &[Uuid]) -> StoreResult<Vec<EdgeUser>> {
        let sql = format!(
            r#"SELECT s.author_id AS pivot_id, {}
            FROM subscribers_on_authors s
            JOIN users u ON u.id = s.subscriber_id
            WHERE s.author_id = ANY($1)
            ORDER BY u.name ASC, u.id ASC"#,
            USER_COLUMNS_U
        );
        let rows: Vec<EdgeUserRow> = sqlx::query_as(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(EdgeUser::from).collect())
    }

    async fn find_authors_followed_by(
        &self,
        subscriber_ids: &[Uuid],
    ) -> StoreResult<Vec<EdgeUser>> {
        let sql = format!(
            r#"SELECT s.subscriber_id AS pivot_id, {}
            FROM subscribers_on_authors s
            JOIN users u ON u.id = s.author_id
            WHERE s.subscriber_id = ANY($1)
            ORDER BY u.name ASC, u.id ASC"#,
            USER_COLUMNS_U
        );
        let rows: Vec<EdgeUserRow> = sqlx::query_as(&sql)
            .bind(subscriber_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(EdgeUser::from).collect())
    }

    async fn subscribe(&self, edge: Subscription) -> StoreResult<()> {
        sqlx::query(
            r#"INSERT INTO subscribers_on_authors (subscriber_id, author_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING"#,
        )
        .bind(edge.subscriber_id)
        .bind(edge.author_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn unsubscribe(&self, edge: Subscription) -> StoreResult<bool> {
        let result = sqlx::query(
            "DELETE FROM subscribers_on_authors WHERE subscriber_id = $1 AND author_id = $2",
        )
        .bind(edge.subscriber_id)
        .bind(edge.author_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
