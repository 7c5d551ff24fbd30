//! User queries for the PostgreSQL store

use async_trait::async_trait;
use uuid::Uuid;

use super::postgres::PgStore;
use super::utils::USER_COLUMNS;
use super::{StoreResult, UserStore};
use crate::models::{NewUser, User, UserChanges};

#[async_trait]
impl UserStore for PgStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY name ASC, id ASC", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_users_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ANY($1)", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_user(&self, input: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (name, balance) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(input.name)
            .bind(input.balance)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>> {
        let sql = format!(
            r#"UPDATE users
            SET name = COALESCE($2, name),
                balance = COALESCE($3, balance)
            WHERE id = $1
            RETURNING {}"#,
            USER_COLUMNS
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.balance)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        // profiles, posts and subscription edges cascade
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
