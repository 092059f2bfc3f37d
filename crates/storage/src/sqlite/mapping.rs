use academy_core::model::{
    Course, CourseCategory, CourseId, CourseLevel, Lesson, LessonId, Profile, Role, UserId,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Map driver errors onto the storage taxonomy.
pub(crate) fn db_err(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StorageError::Conflict;
        }
        if db.is_foreign_key_violation() {
            return StorageError::NotFound;
        }
    }
    StorageError::Connection(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn course_id_from_i64(v: i64) -> Result<CourseId, StorageError> {
    Ok(CourseId::new(i64_to_u64("course_id", v)?))
}

pub(crate) fn lesson_id_from_i64(v: i64) -> Result<LessonId, StorageError> {
    Ok(LessonId::new(i64_to_u64("lesson_id", v)?))
}

pub(crate) fn user_id_from_str(s: &str) -> Result<UserId, StorageError> {
    s.parse::<UserId>().map_err(ser)
}

pub(crate) fn parse_role(s: &str) -> Result<Role, StorageError> {
    s.parse::<Role>().map_err(ser)
}

pub(crate) fn map_course_row(row: &SqliteRow) -> Result<Course, StorageError> {
    let category = row
        .try_get::<Option<String>, _>("category")
        .map_err(ser)?
        .map(CourseCategory::new)
        .transpose()
        .map_err(ser)?;
    let level = row
        .try_get::<Option<String>, _>("level")
        .map_err(ser)?
        .map(|raw| raw.parse::<CourseLevel>())
        .transpose()
        .map_err(ser)?;
    let duration_minutes = row
        .try_get::<Option<i64>, _>("duration_minutes")
        .map_err(ser)?
        .map(|v| {
            u32::try_from(v)
                .map_err(|_| StorageError::Serialization(format!("invalid duration_minutes: {v}")))
        })
        .transpose()?;
    let created_by: String = row.try_get("created_by").map_err(ser)?;

    Course::from_persisted(
        course_id_from_i64(row.try_get("id").map_err(ser)?)?,
        row.try_get("title").map_err(ser)?,
        row.try_get("description").map_err(ser)?,
        category,
        level,
        duration_minutes,
        row.try_get::<i64, _>("is_featured").map_err(ser)? != 0,
        row.try_get::<i64, _>("is_extra").map_err(ser)? != 0,
        row.try_get::<i64, _>("is_published").map_err(ser)? != 0,
        user_id_from_str(&created_by)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_lesson_row(row: &SqliteRow) -> Result<Lesson, StorageError> {
    let order_index: i64 = row.try_get("order_index").map_err(ser)?;
    let order_index = u32::try_from(order_index)
        .map_err(|_| StorageError::Serialization(format!("invalid order_index: {order_index}")))?;
    Lesson::new(
        lesson_id_from_i64(row.try_get("id").map_err(ser)?)?,
        course_id_from_i64(row.try_get("course_id").map_err(ser)?)?,
        row.try_get::<String, _>("title").map_err(ser)?,
        order_index,
    )
    .map_err(ser)
}

pub(crate) fn map_profile_row(row: &SqliteRow) -> Result<Profile, StorageError> {
    let user_id: String = row.try_get("user_id").map_err(ser)?;
    Ok(Profile {
        user_id: user_id_from_str(&user_id)?,
        name: row.try_get("name").map_err(ser)?,
        avatar_url: row.try_get("avatar_url").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}
