//! Profile queries for the PostgreSQL store

use async_trait::async_trait;
use uuid::Uuid;

use super::postgres::PgStore;
use super::utils::{member_type_labels, PROFILE_COLUMNS};
use super::{ProfileStore, StoreResult};
use crate::models::{MemberTypeId, NewProfile, Profile, ProfileChanges};

#[async_trait]
impl ProfileStore for PgStore {
    async fn list_profiles(&self) -> StoreResult<Vec<Profile>> {
        let sql = format!("SELECT {} FROM profiles ORDER BY id ASC", PROFILE_COLUMNS);
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_profile(&self, id: Uuid) -> StoreResult<Option<Profile>> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_profiles_by_user_ids(&self, user_ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        let sql = format!(
            "SELECT {} FROM profiles WHERE user_id = ANY($1)",
            PROFILE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_profiles_by_member_type_ids(
        &self,
        member_type_ids: &[MemberTypeId],
    ) -> StoreResult<Vec<Profile>> {
        let sql = format!(
            "SELECT {} FROM profiles WHERE member_type_id::text = ANY($1) ORDER BY id ASC",
            PROFILE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(member_type_labels(member_type_ids))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_profile(&self, input: NewProfile) -> StoreResult<Profile> {
        let sql = format!(
            r#"INSERT INTO profiles (is_male, year_of_birth, user_id, member_type_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}"#,
            PROFILE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(input.is_male)
            .bind(input.year_of_birth)
            .bind(input.user_id)
            .bind(input.member_type_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> StoreResult<Option<Profile>> {
        let sql = format!(
            r#"UPDATE profiles
            SET is_male = COALESCE($2, is_male),
                year_of_birth = COALESCE($3, year_of_birth),
                member_type_id = COALESCE($4, member_type_id)
            WHERE id = $1
            RETURNING {}"#,
            PROFILE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(changes.is_male)
            .bind(changes.year_of_birth)
            .bind(changes.member_type_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_profile(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
