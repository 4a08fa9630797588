use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

use hydro_core::model::AppSettings;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for persisted application settings.
///
/// There is exactly one settings row; `get_settings` returns `None` on a
/// fresh database so callers can fall back to defaults.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch the persisted settings, if any exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decoding failures.
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError>;

    /// Persist the settings, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be stored.
    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    settings: Arc<Mutex<Option<AppSettings>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        let guard = self
            .settings
            .lock()
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

/// Bundle of repositories behind trait objects, so services stay
/// storage-agnostic.
#[derive(Clone)]
pub struct Storage {
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    /// Build a `Storage` backed entirely by memory.
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            settings: Arc::new(repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_core::model::{AppSettingsDraft, ThemePreference};

    #[tokio::test]
    async fn in_memory_settings_roundtrip() {
        let storage = Storage::in_memory();
        assert!(storage.settings.get_settings().await.unwrap().is_none());

        let settings = AppSettingsDraft {
            theme: ThemePreference::Dark,
            api_key: Some("key".into()),
            ..AppSettingsDraft::new()
        }
        .validate()
        .unwrap();
        storage.settings.save_settings(&settings).await.unwrap();

        let loaded = storage.settings.get_settings().await.unwrap().unwrap();
        assert_eq!(loaded.theme(), ThemePreference::Dark);
        assert_eq!(loaded.api_key(), Some("key"));
    }
}
