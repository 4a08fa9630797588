use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Light/dark preference persisted across launches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Stable storage token; also used as a CSS class hook.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError;

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("theme must be \"light\" or \"dark\"")
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for ThemePreference {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            _ => Err(ParseThemeError),
        }
    }
}

/// Persisted application preferences: theme plus tutor API configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppSettings {
    theme: ThemePreference,
    api_key: Option<String>,
    api_model: Option<String>,
    api_base_url: Option<String>,
    tutor_system_prompt: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct AppSettingsDraft {
    pub theme: ThemePreference,
    pub api_key: Option<String>,
    pub api_model: Option<String>,
    pub api_base_url: Option<String>,
    pub tutor_system_prompt: Option<String>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppSettingsError {
    #[error("invalid base URL")]
    InvalidBaseUrl,
}

impl AppSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft into persisted settings.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the base URL is present but invalid.
    pub fn validate(self) -> Result<AppSettings, AppSettingsError> {
        let api_key = normalize_optional(self.api_key);
        let api_model = normalize_optional(self.api_model);
        let api_base_url = normalize_optional(self.api_base_url);
        let tutor_system_prompt = normalize_optional(self.tutor_system_prompt);

        if let Some(url) = api_base_url.as_ref() {
            if Url::parse(url).is_err() {
                return Err(AppSettingsError::InvalidBaseUrl);
            }
        }

        Ok(AppSettings {
            theme: self.theme,
            api_key,
            api_model,
            api_base_url,
            tutor_system_prompt,
        })
    }
}

impl AppSettings {
    /// Rehydrate settings from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if a persisted field no longer validates.
    pub fn from_persisted(draft: AppSettingsDraft) -> Result<Self, AppSettingsError> {
        draft.validate()
    }

    #[must_use]
    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    /// Copy with the theme flipped; everything else untouched.
    #[must_use]
    pub fn with_theme(mut self, theme: ThemePreference) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn api_model(&self) -> Option<&str> {
        self.api_model.as_deref()
    }

    #[must_use]
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    #[must_use]
    pub fn tutor_system_prompt(&self) -> Option<&str> {
        self.tutor_system_prompt.as_deref()
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::Light,
            api_key: None,
            api_model: None,
            api_base_url: None,
            tutor_system_prompt: None,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_normalizes_blank_fields_to_none() {
        let settings = AppSettingsDraft {
            api_key: Some("  ".into()),
            api_model: Some(" gpt-4o-mini ".into()),
            ..AppSettingsDraft::new()
        }
        .validate()
        .unwrap();

        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.api_model(), Some("gpt-4o-mini"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = AppSettingsDraft {
            api_base_url: Some("not-a-url".into()),
            ..AppSettingsDraft::new()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppSettingsError::InvalidBaseUrl));
    }

    #[test]
    fn theme_toggles_and_parses() {
        assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
        assert_eq!("dark".parse::<ThemePreference>().unwrap(), ThemePreference::Dark);
        assert_eq!("LIGHT".parse::<ThemePreference>().unwrap(), ThemePreference::Light);
        assert!("sepia".parse::<ThemePreference>().is_err());
    }
}
