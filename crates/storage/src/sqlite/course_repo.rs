use academy_core::model::{Course, CourseId, NewCourse};

use super::SqliteRepository;
use super::mapping::{course_id_from_i64, db_err, id_to_i64, map_course_row};
use crate::repository::{CourseRepository, StorageError};

const COURSE_COLUMNS: &str = "id, title, description, category, level, duration_minutes, \
     is_featured, is_extra, is_published, created_by, created_at";

#[async_trait::async_trait]
impl CourseRepository for SqliteRepository {
    async fn insert_new_course(&self, course: &NewCourse) -> Result<Course, StorageError> {
        let duration = course.duration_minutes.map(i64::from);

        let res = sqlx::query(
            r"
            INSERT INTO courses (title, description, category, level, duration_minutes,
                                 is_featured, is_extra, is_published, created_by, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.category.as_ref().map(|c| c.as_str().to_string()))
        .bind(course.level.map(|l| l.as_str()))
        .bind(duration)
        .bind(i64::from(course.is_featured))
        .bind(i64::from(course.is_extra))
        .bind(i64::from(course.is_published))
        .bind(course.created_by.to_string())
        .bind(course.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = course_id_from_i64(res.last_insert_rowid())?;
        Ok(course.clone().into_course(id))
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id_to_i64("course_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(map_course_row).transpose()
    }

    async fn list_published_courses(&self) -> Result<Vec<Course>, StorageError> {
        let sql = format!(
            "SELECT {COURSE_COLUMNS} FROM courses
             WHERE is_published = 1
             ORDER BY is_featured DESC, created_at ASC, id ASC"
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(map_course_row).collect()
    }
}
