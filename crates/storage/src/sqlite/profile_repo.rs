use academy_core::model::{Profile, ProfileUpdate, Role, UserId};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{db_err, map_profile_row, parse_role, ser, user_id_from_str};
use crate::repository::{ProfileRepository, RoleRepository, StorageError};

#[async_trait::async_trait]
impl ProfileRepository for SqliteRepository {
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO profiles (user_id, name, avatar_url, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id) DO UPDATE SET
                name = excluded.name,
                avatar_url = excluded.avatar_url
            ",
        )
        .bind(profile.user_id.to_string())
        .bind(profile.name.as_deref())
        .bind(profile.avatar_url.as_deref())
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StorageError> {
        let row = sqlx::query(
            "SELECT user_id, name, avatar_url, created_at FROM profiles WHERE user_id = ?1",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(map_profile_row).transpose()
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, StorageError> {
        let row = sqlx::query(
            r"
            UPDATE profiles SET name = ?2, avatar_url = ?3
            WHERE user_id = ?1
            RETURNING user_id, name, avatar_url, created_at
            ",
        )
        .bind(user_id.to_string())
        .bind(update.name())
        .bind(update.avatar_url())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        match row {
            Some(row) => map_profile_row(&row),
            None => Err(StorageError::NotFound),
        }
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT user_id, name, avatar_url, created_at
            FROM profiles
            ORDER BY created_at ASC, user_id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(map_profile_row).collect()
    }
}

#[async_trait::async_trait]
impl RoleRepository for SqliteRepository {
    async fn get_role(&self, user_id: UserId) -> Result<Option<Role>, StorageError> {
        let role: Option<String> = sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = ?1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        role.as_deref().map(parse_role).transpose()
    }

    async fn set_role(&self, user_id: UserId, role: Role) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO user_roles (user_id, role)
            VALUES (?1, ?2)
            ON CONFLICT(user_id) DO UPDATE SET role = excluded.role
            ",
        )
        .bind(user_id.to_string())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn list_roles(&self) -> Result<Vec<(UserId, Role)>, StorageError> {
        let rows = sqlx::query("SELECT user_id, role FROM user_roles ORDER BY user_id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter()
            .map(|row| {
                let user_id: String = row.try_get("user_id").map_err(ser)?;
                let role: String = row.try_get("role").map_err(ser)?;
                Ok((user_id_from_str(&user_id)?, parse_role(&role)?))
            })
            .collect()
    }
}
