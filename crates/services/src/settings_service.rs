use std::sync::Arc;

use hydro_core::model::{AppSettings, AppSettingsDraft, ThemePreference};
use storage::repository::SettingsRepository;

use crate::error::SettingsServiceError;

#[derive(Clone)]
pub struct AppSettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl AppSettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted settings (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn load(&self) -> Result<AppSettings, SettingsServiceError> {
        let settings = self.repo.get_settings().await?;
        Ok(settings.unwrap_or_default())
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if validation fails or persistence fails.
    pub async fn save(
        &self,
        draft: AppSettingsDraft,
    ) -> Result<AppSettings, SettingsServiceError> {
        let settings = draft.validate()?;
        self.repo.save_settings(&settings).await?;
        Ok(settings)
    }

    /// Persist a theme change, keeping every other field as stored.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn set_theme(
        &self,
        theme: ThemePreference,
    ) -> Result<AppSettings, SettingsServiceError> {
        let settings = self.load().await?.with_theme(theme);
        self.repo.save_settings(&settings).await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::Storage;

    #[tokio::test]
    async fn load_falls_back_to_defaults() {
        let storage = Storage::in_memory();
        let service = AppSettingsService::new(storage.settings);

        let settings = service.load().await.unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[tokio::test]
    async fn set_theme_keeps_other_fields() {
        let storage = Storage::in_memory();
        let service = AppSettingsService::new(storage.settings);

        service
            .save(AppSettingsDraft {
                api_key: Some("key".into()),
                ..AppSettingsDraft::new()
            })
            .await
            .unwrap();

        let updated = service.set_theme(ThemePreference::Dark).await.unwrap();
        assert_eq!(updated.theme(), ThemePreference::Dark);
        assert_eq!(updated.api_key(), Some("key"));

        let reloaded = service.load().await.unwrap();
        assert_eq!(reloaded, updated);
    }
}
