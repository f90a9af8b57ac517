use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::record::InterviewRecordRow;

pub const DEFAULT_LIST_LIMIT: i64 = 20;
pub const MAX_LIST_LIMIT: i64 = 100;

/// Parameters for inserting a finished interview.
pub struct NewRecord<'a> {
    pub company: &'a serde_json::Value,
    pub position: &'a str,
    pub experience: &'a str,
    pub messages: &'a serde_json::Value,
    pub difficult_questions: &'a [String],
    pub file_count: i32,
}

/// Clamps a client-supplied page size into `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

pub async fn insert_record(
    pool: &PgPool,
    record: NewRecord<'_>,
) -> Result<InterviewRecordRow, sqlx::Error> {
    let id = Uuid::new_v4();
    let row = sqlx::query_as::<_, InterviewRecordRow>(
        r#"
        INSERT INTO interview_records
            (id, company, position, experience, messages, difficult_questions, file_count)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, company, position, experience, messages, difficult_questions,
                  file_count, created_at
        "#,
    )
    .bind(id)
    .bind(record.company)
    .bind(record.position)
    .bind(record.experience)
    .bind(record.messages)
    .bind(record.difficult_questions)
    .bind(record.file_count)
    .fetch_one(pool)
    .await?;

    info!("Saved interview record {id}");
    Ok(row)
}

/// Newest first.
pub async fn list_records(pool: &PgPool, limit: i64) -> Result<Vec<InterviewRecordRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewRecordRow>(
        r#"
        SELECT id, company, position, experience, messages, difficult_questions,
               file_count, created_at
        FROM interview_records
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn get_record(pool: &PgPool, id: Uuid) -> Result<Option<InterviewRecordRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewRecordRow>(
        r#"
        SELECT id, company, position, experience, messages, difficult_questions,
               file_count, created_at
        FROM interview_records
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Returns false when no record had that id.
pub async fn delete_record(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM interview_records WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        info!("Deleted interview record {id}");
    }
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some(5)), 5);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-3)), 1);
        assert_eq!(clamp_limit(Some(500)), 100);
    }
}
