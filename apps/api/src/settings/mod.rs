//! Settings store — string key/value pairs for the API key and the user profile.
//!
//! The controller receives an `Arc<dyn SettingsStore>` at construction and reads
//! it on demand; nothing is cached. Writes take effect immediately.
//! Writing an empty string removes the key.

pub mod handlers;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::profile::UserProfile;

pub const API_KEY: &str = "openai_api_key";

pub const PROFILE_FULL_NAME: &str = "profile.full_name";
pub const PROFILE_JOB_TITLE: &str = "profile.job_title";
pub const PROFILE_EMAIL: &str = "profile.email";
pub const PROFILE_PHONE: &str = "profile.phone";
pub const PROFILE_STREET: &str = "profile.street";
pub const PROFILE_CITY: &str = "profile.city";
pub const PROFILE_STATE: &str = "profile.state";
pub const PROFILE_ZIP: &str = "profile.zip";
pub const PROFILE_PORTFOLIO_URL: &str = "profile.portfolio_url";

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// SQLite-backed store (production)
// ────────────────────────────────────────────────────────────────────────────

/// Stores settings in the `settings` table of the local database.
pub struct SqliteSettingsStore {
    pool: SqlitePool,
}

impl SqliteSettingsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(
            sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        if value.is_empty() {
            sqlx::query("DELETE FROM settings WHERE key = ?1")
                .bind(key)
                .execute(&self.pool)
                .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO settings (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySettingsStore {
    values: tokio::sync::RwLock<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut values = self.values.write().await;
        if value.is_empty() {
            values.remove(key);
        } else {
            values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Typed accessors
// ────────────────────────────────────────────────────────────────────────────

/// The configured API key, ignoring blank values.
pub async fn api_key(store: &dyn SettingsStore) -> Result<Option<String>, AppError> {
    Ok(store
        .get(API_KEY)
        .await?
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty()))
}

pub async fn load_profile(store: &dyn SettingsStore) -> Result<UserProfile, AppError> {
    let field = |key: &'static str| async move {
        store.get(key).await.map(Option::unwrap_or_default)
    };

    Ok(UserProfile {
        full_name: field(PROFILE_FULL_NAME).await?,
        job_title: field(PROFILE_JOB_TITLE).await?,
        email: field(PROFILE_EMAIL).await?,
        phone: field(PROFILE_PHONE).await?,
        street: field(PROFILE_STREET).await?,
        city: field(PROFILE_CITY).await?,
        state: field(PROFILE_STATE).await?,
        zip: field(PROFILE_ZIP).await?,
        portfolio_url: field(PROFILE_PORTFOLIO_URL).await?,
    })
}

pub async fn save_profile(store: &dyn SettingsStore, profile: &UserProfile) -> Result<(), AppError> {
    let fields = [
        (PROFILE_FULL_NAME, &profile.full_name),
        (PROFILE_JOB_TITLE, &profile.job_title),
        (PROFILE_EMAIL, &profile.email),
        (PROFILE_PHONE, &profile.phone),
        (PROFILE_STREET, &profile.street),
        (PROFILE_CITY, &profile.city),
        (PROFILE_STATE, &profile.state),
        (PROFILE_ZIP, &profile.zip),
        (PROFILE_PORTFOLIO_URL, &profile.portfolio_url),
    ];
    for (key, value) in fields {
        store.set(key, value).await?;
    }
    Ok(())
}
