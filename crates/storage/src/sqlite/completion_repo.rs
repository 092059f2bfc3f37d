use academy_core::model::{LessonCompletion, LessonId, UserId};
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{db_err, id_to_i64, lesson_id_from_i64, ser};
use crate::repository::{CompletionRepository, StorageError};

#[async_trait::async_trait]
impl CompletionRepository for SqliteRepository {
    async fn list_completions(&self, user_id: UserId) -> Result<Vec<LessonCompletion>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT lesson_id, completed
            FROM user_progress
            WHERE user_id = ?1
            ORDER BY lesson_id ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter()
            .map(|row| {
                Ok(LessonCompletion::new(
                    lesson_id_from_i64(row.try_get("lesson_id").map_err(ser)?)?,
                    row.try_get::<i64, _>("completed").map_err(ser)? != 0,
                ))
            })
            .collect()
    }

    async fn mark_complete(
        &self,
        user_id: UserId,
        lesson_id: LessonId,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        // SET expressions read the pre-update row, so a completed record keeps its timestamp.
        sqlx::query(
            r"
            INSERT INTO user_progress (user_id, lesson_id, completed, completed_at)
            VALUES (?1, ?2, 1, ?3)
            ON CONFLICT(user_id, lesson_id) DO UPDATE SET
                completed_at = CASE
                    WHEN user_progress.completed = 1 THEN user_progress.completed_at
                    ELSE excluded.completed_at
                END,
                completed = 1
            ",
        )
        .bind(user_id.to_string())
        .bind(id_to_i64("lesson_id", lesson_id.value())?)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }
}
