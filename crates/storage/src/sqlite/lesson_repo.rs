use academy_core::model::{CourseId, Lesson, LessonRef};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{course_id_from_i64, db_err, id_to_i64, lesson_id_from_i64, map_lesson_row, ser};
use crate::repository::{LessonRepository, StorageError};

#[async_trait::async_trait]
impl LessonRepository for SqliteRepository {
    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO lessons (id, course_id, title, order_index)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                course_id = excluded.course_id,
                title = excluded.title,
                order_index = excluded.order_index
            ",
        )
        .bind(id_to_i64("lesson_id", lesson.id().value())?)
        .bind(id_to_i64("course_id", lesson.course_id().value())?)
        .bind(lesson.title())
        .bind(i64::from(lesson.order_index()))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn list_lessons(&self) -> Result<Vec<LessonRef>, StorageError> {
        let rows = sqlx::query("SELECT id, course_id FROM lessons ORDER BY course_id, order_index")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter()
            .map(|row| {
                Ok(LessonRef::new(
                    lesson_id_from_i64(row.try_get("id").map_err(ser)?)?,
                    course_id_from_i64(row.try_get("course_id").map_err(ser)?)?,
                ))
            })
            .collect()
    }

    async fn list_course_lessons(&self, course_id: CourseId) -> Result<Vec<Lesson>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, course_id, title, order_index
            FROM lessons
            WHERE course_id = ?1
            ORDER BY order_index ASC
            ",
        )
        .bind(id_to_i64("course_id", course_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(map_lesson_row).collect()
    }
}
