//! Member type queries for the PostgreSQL store

use async_trait::async_trait;

use super::postgres::PgStore;
use super::utils::{member_type_labels, MEMBER_TYPE_COLUMNS};
use super::{MemberTypeStore, StoreResult};
use crate::models::{MemberType, MemberTypeId};

#[async_trait]
impl MemberTypeStore for PgStore {
    async fn list_member_types(&self) -> StoreResult<Vec<MemberType>> {
        let sql = format!(
            "SELECT {} FROM member_types ORDER BY id ASC",
            MEMBER_TYPE_COLUMNS
        );
        Ok(sqlx::query_as::<_, MemberType>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_member_type(&self, id: MemberTypeId) -> StoreResult<Option<MemberType>> {
        let sql = format!("SELECT {} FROM member_types WHERE id = $1", MEMBER_TYPE_COLUMNS);
        Ok(sqlx::query_as::<_, MemberType>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_member_types_by_ids(
        &self,
        ids: &[MemberTypeId],
    ) -> StoreResult<Vec<MemberType>> {
        let sql = format!(
            "SELECT {} FROM member_types WHERE id::text = ANY($1)",
            MEMBER_TYPE_COLUMNS
        );
        Ok(sqlx::query_as::<_, MemberType>(&sql)
            .bind(member_type_labels(ids))
            .fetch_all(&self.pool)
            .await?)
    }
}
