//! Letter lifecycle controller — owns the UI session and runs generation.
//!
//! Flow of `generate()`: gate → credential check → input check → build request →
//! provider call → parse → finalize content → create or update record → commit.
//!
//! Only one generation may be outstanding. Failures leave the record store and
//! the displayed content untouched; the message is kept in the session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::request_builder::build_request;
use crate::generation::response_processor::{finalize_content, parse_response, LetterPayload};
use crate::history::store::{delete_record, get_record, insert_record, list_records, update_record};
use crate::llm_client::ResponsesClient;
use crate::models::history::HistoryRecord;
use crate::models::options::{LengthOption, ToneOption};
use crate::settings::{self, SettingsStore};

const SAMPLE_RESUME: &str = "\
John Doe
Software Engineer
Experience:
- Senior Developer at Tech Corp (2020-Present): Led a team of 5 developers.
- Junior Developer at Startup Inc (2018-2020): React and Redux.
Skills: React, Node.js, TypeScript, SQL, AWS, Docker
Education: BS in Computer Science";

const SAMPLE_JOB_DESCRIPTION: &str = "\
We are looking for a Senior Software Engineer to join our cloud infra team.
Must have experience with AWS and leading teams.";

// ────────────────────────────────────────────────────────────────────────────
// Session state
// ────────────────────────────────────────────────────────────────────────────

/// What the form currently shows. `selected == None` is a fresh, unsaved draft.
#[derive(Debug, Clone, Default)]
struct Session {
    selected: Option<Uuid>,
    resume_text: String,
    job_description: String,
    generated_content: String,
    length_option: LengthOption,
    tone_option: ToneOption,
    error_message: Option<String>,
}

/// Snapshot returned to the front end after every operation.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub selected_id: Option<Uuid>,
    pub resume_text: String,
    pub job_description: String,
    pub generated_content: String,
    pub character_count: usize,
    pub character_count_formatted: String,
    pub length_option: LengthOption,
    pub tone_option: ToneOption,
    pub error_message: Option<String>,
    pub is_generating: bool,
}

/// Partial form update; absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputsUpdate {
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
    pub length_option: Option<LengthOption>,
    pub tone_option: Option<ToneOption>,
}

/// Form contents implied by a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedInputs {
    pub resume_text: String,
    pub job_description: String,
    pub generated_content: String,
    pub length_option: LengthOption,
    pub tone_option: ToneOption,
}

/// Pure mapping applied on selection change.
pub fn derive_inputs(record: &HistoryRecord) -> DerivedInputs {
    DerivedInputs {
        resume_text: record.resume_text.clone(),
        job_description: record.job_description.clone(),
        generated_content: record.generated_content.clone(),
        length_option: record.length_option,
        tone_option: record.tone_option,
    }
}

/// Number of characters (Unicode scalar values) in the generated content.
pub fn character_count(content: &str) -> usize {
    content.chars().count()
}

/// `1234567` → `"1,234,567"`.
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// In-progress gate
// ────────────────────────────────────────────────────────────────────────────

/// Holds the in-progress flag for the lifetime of one generation.
struct GenerationGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> GenerationGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Controller
// ────────────────────────────────────────────────────────────────────────────

pub struct LetterController {
    pool: SqlitePool,
    llm: ResponsesClient,
    settings: Arc<dyn SettingsStore>,
    session: Mutex<Session>,
    in_progress: AtomicBool,
}

impl LetterController {
    pub fn new(pool: SqlitePool, llm: ResponsesClient, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            pool,
            llm,
            settings,
            session: Mutex::new(Session::default()),
            in_progress: AtomicBool::new(false),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    pub async fn session(&self) -> SessionView {
        let session = self.session.lock().await;
        self.view(&session)
    }

    /// Locks the session for an edit. Edits are refused while a generation is
    /// running, since its result is written back against the snapshot it took.
    async fn editable_session(&self) -> Result<MutexGuard<'_, Session>, AppError> {
        let session = self.session.lock().await;
        if self.is_generating() {
            return Err(AppError::GenerationInProgress);
        }
        Ok(session)
    }

    pub async fn update_inputs(&self, update: InputsUpdate) -> Result<SessionView, AppError> {
        let mut session = self.editable_session().await?;
        if let Some(resume) = update.resume_text {
            session.resume_text = resume;
        }
        if let Some(job) = update.job_description {
            session.job_description = job;
        }
        if let Some(length) = update.length_option {
            session.length_option = length;
        }
        if let Some(tone) = update.tone_option {
            session.tone_option = tone;
        }
        Ok(self.view(&session))
    }

    /// Starts a fresh draft. Length and tone preferences carry over.
    pub async fn new_draft(&self) -> Result<SessionView, AppError> {
        let mut session = self.editable_session().await?;
        *session = Session {
            length_option: session.length_option,
            tone_option: session.tone_option,
            ..Session::default()
        };
        Ok(self.view(&session))
    }

    pub async fn fill_sample_inputs(&self) -> Result<SessionView, AppError> {
        let mut session = self.editable_session().await?;
        session.resume_text = SAMPLE_RESUME.to_string();
        session.job_description = SAMPLE_JOB_DESCRIPTION.to_string();
        Ok(self.view(&session))
    }

    pub async fn history(&self) -> Result<Vec<HistoryRecord>, AppError> {
        list_records(&self.pool).await
    }

    pub async fn select(&self, id: Uuid) -> Result<SessionView, AppError> {
        let record = get_record(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Letter {id} not found")))?;
        let inputs = derive_inputs(&record);

        let mut session = self.editable_session().await?;
        session.selected = Some(record.id);
        session.resume_text = inputs.resume_text;
        session.job_description = inputs.job_description;
        session.generated_content = inputs.generated_content;
        session.length_option = inputs.length_option;
        session.tone_option = inputs.tone_option;
        session.error_message = None;
        Ok(self.view(&session))
    }

    /// Deletes a record; clears the selection if it pointed at it.
    pub async fn delete(&self, id: Uuid) -> Result<SessionView, AppError> {
        let mut session = self.editable_session().await?;
        if !delete_record(&self.pool, id).await? {
            return Err(AppError::NotFound(format!("Letter {id} not found")));
        }
        info!("Deleted letter {id}");

        if session.selected == Some(id) {
            session.selected = None;
        }
        Ok(self.view(&session))
    }

    pub async fn generate(&self) -> Result<SessionView, AppError> {
        let guard =
            GenerationGuard::acquire(&self.in_progress).ok_or(AppError::GenerationInProgress)?;

        let snapshot = self.session.lock().await.clone();
        let result = self.run_generation(&snapshot).await;

        // Release the gate only once the session lock is held, so the next
        // generation snapshots the updated selection.
        let mut session = self.session.lock().await;
        drop(guard);
        match result {
            Ok((record, content)) => {
                session.selected = Some(record.id);
                session.generated_content = content;
                session.error_message = None;
                Ok(self.view(&session))
            }
            Err(e) => {
                session.error_message = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn run_generation(&self, input: &Session) -> Result<(HistoryRecord, String), AppError> {
        let api_key = settings::api_key(self.settings.as_ref())
            .await?
            .ok_or(AppError::MissingCredential)?;

        if input.resume_text.trim().is_empty() || input.job_description.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }

        let request = build_request(
            &input.resume_text,
            &input.job_description,
            input.length_option,
            input.tone_option,
        );
        info!(
            "Generating letter: length={} tone={} resume_chars={} job_chars={}",
            input.length_option.as_str(),
            input.tone_option.as_str(),
            input.resume_text.len(),
            input.job_description.len()
        );

        let raw = self.llm.send(&api_key, &request).await?;
        let payload = parse_response(&raw)?;

        let profile = settings::load_profile(self.settings.as_ref()).await?;
        let content = finalize_content(&payload.cover_letter, &profile);

        let record = self.persist(input, &payload, &content).await?;
        Ok((record, content))
    }

    /// Updates the selected record in place, or creates and inserts a new one.
    async fn persist(
        &self,
        input: &Session,
        payload: &LetterPayload,
        content: &str,
    ) -> Result<HistoryRecord, AppError> {
        let existing = match input.selected {
            Some(id) => {
                let found = get_record(&self.pool, id).await?;
                if found.is_none() {
                    warn!("Selected letter {id} no longer exists; saving as a new letter");
                }
                found
            }
            None => None,
        };

        match existing {
            Some(mut record) => {
                record.resume_text = input.resume_text.clone();
                record.job_description = input.job_description.clone();
                record.generated_content = content.to_string();
                record.length_option = input.length_option;
                record.tone_option = input.tone_option;
                record.created_at = chrono::Utc::now();
                if payload.structured {
                    record.title = payload.title.clone();
                }
                self.write_in_place(record).await
            }
            None => {
                let mut record = HistoryRecord::new(
                    input.resume_text.clone(),
                    input.job_description.clone(),
                    content.to_string(),
                    input.length_option,
                    input.tone_option,
                );
                if payload.structured {
                    record.title = payload.title.clone();
                }
                insert_record(&self.pool, &record).await?;
                Ok(record)
            }
        }
    }

    /// Overwrites an existing record. If the row vanished since it was read,
    /// the letter is kept as a new record instead.
    async fn write_in_place(&self, mut record: HistoryRecord) -> Result<HistoryRecord, AppError> {
        match update_record(&self.pool, &record).await {
            Err(AppError::NotFound(_)) => {
                warn!("Letter {} was deleted before saving; storing as a new letter", record.id);
                record.id = Uuid::new_v4();
                insert_record(&self.pool, &record).await?;
            }
            other => other?,
        }
        Ok(record)
    }

    fn view(&self, session: &Session) -> SessionView {
        let count = character_count(&session.generated_content);
        SessionView {
            selected_id: session.selected,
            resume_text: session.resume_text.clone(),
            job_description: session.job_description.clone(),
            generated_content: session.generated_content.clone(),
            character_count: count,
            character_count_formatted: format_count(count),
            length_option: session.length_option,
            tone_option: session.tone_option,
            error_message: session.error_message.clone(),
            is_generating: self.is_generating(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
