//! Persistence for history records.
//!
//! Every write runs in its own transaction and is committed before returning.

use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::history::{HistoryRecord, HistoryRecordRow};

pub async fn insert_record(pool: &SqlitePool, record: &HistoryRecord) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO history_records
            (id, created_at, resume_text, job_description, generated_content,
             title, length_option, tone_option)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(record.id)
    .bind(record.created_at)
    .bind(&record.resume_text)
    .bind(&record.job_description)
    .bind(&record.generated_content)
    .bind(&record.title)
    .bind(record.length_option.as_str())
    .bind(record.tone_option.as_str())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Inserted history record {}", record.id);
    Ok(())
}

/// Overwrites every mutable field of an existing record. The id is the key and
/// is never rewritten.
pub async fn update_record(pool: &SqlitePool, record: &HistoryRecord) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE history_records
        SET created_at = ?2,
            resume_text = ?3,
            job_description = ?4,
            generated_content = ?5,
            title = ?6,
            length_option = ?7,
            tone_option = ?8
        WHERE id = ?1
        "#,
    )
    .bind(record.id)
    .bind(record.created_at)
    .bind(&record.resume_text)
    .bind(&record.job_description)
    .bind(&record.generated_content)
    .bind(&record.title)
    .bind(record.length_option.as_str())
    .bind(record.tone_option.as_str())
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Letter {} not found", record.id)));
    }

    tx.commit().await?;

    info!("Updated history record {}", record.id);
    Ok(())
}

/// Returns true when a record was removed.
pub async fn delete_record(pool: &SqlitePool, id: Uuid) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM history_records WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_record(pool: &SqlitePool, id: Uuid) -> Result<Option<HistoryRecord>, AppError> {
    Ok(
        sqlx::query_as::<_, HistoryRecordRow>("SELECT * FROM history_records WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(HistoryRecord::from),
    )
}

/// All records, newest first.
pub async fn list_records(pool: &SqlitePool) -> Result<Vec<HistoryRecord>, AppError> {
    Ok(sqlx::query_as::<_, HistoryRecordRow>(
        "SELECT * FROM history_records ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(HistoryRecord::from)
    .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::models::options::{LengthOption, ToneOption};
    use chrono::{Duration, Utc};

    fn record(title: &str) -> HistoryRecord {
        let mut r = HistoryRecord::new(
            "resume".into(),
            "job".into(),
            "content".into(),
            LengthOption::Long,
            ToneOption::Simple,
        );
        r.title = title.into();
        r
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let pool = create_memory_pool().await.unwrap();
        let r = record("Backend Engineer at Acme");
        insert_record(&pool, &r).await.unwrap();

        let loaded = get_record(&pool, r.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, r.id);
        assert_eq!(loaded.title, "Backend Engineer at Acme");
        assert_eq!(loaded.length_option, LengthOption::Long);
        assert_eq!(loaded.tone_option, ToneOption::Simple);
        assert_eq!(loaded.created_at, r.created_at);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let pool = create_memory_pool().await.unwrap();
        let now = Utc::now();

        let mut oldest = record("oldest");
        oldest.created_at = now - Duration::days(2);
        let mut newest = record("newest");
        newest.created_at = now;
        let mut middle = record("middle");
        middle.created_at = now - Duration::hours(3);

        for r in [&oldest, &newest, &middle] {
            insert_record(&pool, r).await.unwrap();
        }

        let titles: Vec<String> = list_records(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_update_in_place_keeps_id() {
        let pool = create_memory_pool().await.unwrap();
        let mut r = record("first");
        insert_record(&pool, &r).await.unwrap();

        r.generated_content = "rewritten".into();
        r.tone_option = ToneOption::Confident;
        update_record(&pool, &r).await.unwrap();

        let all = list_records(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, r.id);
        assert_eq!(all[0].generated_content, "rewritten");
        assert_eq!(all[0].tone_option, ToneOption::Confident);
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let pool = create_memory_pool().await.unwrap();
        let err = update_record(&pool, &record("ghost")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = create_memory_pool().await.unwrap();
        let r = record("doomed");
        insert_record(&pool, &r).await.unwrap();

        assert!(delete_record(&pool, r.id).await.unwrap());
        assert!(!delete_record(&pool, r.id).await.unwrap());
        assert!(get_record(&pool, r.id).await.unwrap().is_none());
    }
}
