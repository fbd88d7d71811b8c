use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::options::{LengthOption, ToneOption};

/// Title given to a record until the model suggests a better one.
pub const PLACEHOLDER_TITLE: &str = "Letter for Position";

/// A saved cover letter. The only persisted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub resume_text: String,
    pub job_description: String,
    pub generated_content: String,
    pub title: String,
    pub length_option: LengthOption,
    pub tone_option: ToneOption,
}

impl HistoryRecord {
    pub fn new(
        resume_text: String,
        job_description: String,
        generated_content: String,
        length_option: LengthOption,
        tone_option: ToneOption,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            resume_text,
            job_description,
            generated_content,
            title: PLACEHOLDER_TITLE.to_string(),
            length_option,
            tone_option,
        }
    }
}

/// Raw `history_records` row. Options are stored as their string tags.
#[derive(Debug, Clone, FromRow)]
pub struct HistoryRecordRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub resume_text: String,
    pub job_description: String,
    pub generated_content: String,
    pub title: String,
    pub length_option: String,
    pub tone_option: String,
}

impl From<HistoryRecordRow> for HistoryRecord {
    fn from(row: HistoryRecordRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            resume_text: row.resume_text,
            job_description: row.job_description,
            generated_content: row.generated_content,
            title: row.title,
            length_option: LengthOption::from_tag(&row.length_option),
            tone_option: ToneOption::from_tag(&row.tone_option),
        }
    }
}

/// Lightweight listing entry for the history sidebar.
#[derive(Debug, Clone, Serialize)]
pub struct HistorySummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub length_option: LengthOption,
    pub tone_option: ToneOption,
}

impl From<&HistoryRecord> for HistorySummary {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            created_at: record.created_at,
            length_option: record.length_option,
            tone_option: record.tone_option,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_gets_placeholder_title_and_fresh_id() {
        let a = HistoryRecord::new(
            "resume".into(),
            "job".into(),
            "letter".into(),
            LengthOption::Short,
            ToneOption::Confident,
        );
        let b = HistoryRecord::new(
            "resume".into(),
            "job".into(),
            "letter".into(),
            LengthOption::Short,
            ToneOption::Confident,
        );
        assert_eq!(a.title, PLACEHOLDER_TITLE);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_row_with_unknown_tags_decodes_to_defaults() {
        let row = HistoryRecordRow {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            resume_text: "r".into(),
            job_description: "j".into(),
            generated_content: "c".into(),
            title: "t".into(),
            length_option: "gigantic".into(),
            tone_option: "conversational".into(),
        };
        let record = HistoryRecord::from(row);
        assert_eq!(record.length_option, LengthOption::Medium);
        assert_eq!(record.tone_option, ToneOption::Conversational);
    }
}
