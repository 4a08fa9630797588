use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use storage::repository::SettingsRepository;

use crate::error::TutorError;

/// Shown to the student whenever the tutor cannot answer, whatever the cause.
/// The conversation never surfaces an error state.
pub const TUTOR_FALLBACK_REPLY: &str =
    "Sorry, I'm having technical trouble right now. Let's try again in a moment.";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly, educational expert on modern \
    hydroponic farming. Answer student questions about hydroponics, smart irrigation, \
    and current agricultural technology.";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct TutorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
}

impl TutorConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("HYDRO_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("HYDRO_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = env::var("HYDRO_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Some(Self {
            base_url,
            api_key,
            model,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
        })
    }
}

/// Chat tutor backed by an external chat-completions endpoint.
///
/// Configuration is resolved per request: persisted settings win, the
/// environment fills the gaps. `ask` is the public surface and always
/// returns text — every failure collapses to `TUTOR_FALLBACK_REPLY` at this
/// boundary so callers never special-case errors.
pub struct TutorService {
    client: Client,
    settings: Arc<dyn SettingsRepository>,
    env_fallback: bool,
}

impl TutorService {
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self {
            client: Client::new(),
            settings,
            env_fallback: true,
        }
    }

    /// Disables the environment fallback. Used by tests so ambient variables
    /// cannot leak into assertions.
    #[must_use]
    pub fn without_env_fallback(mut self) -> Self {
        self.env_fallback = false;
        self
    }

    async fn resolve_config(&self) -> Option<TutorConfig> {
        if let Ok(Some(settings)) = self.settings.get_settings().await {
            if let Some(api_key) = settings.api_key() {
                return Some(TutorConfig {
                    base_url: settings
                        .api_base_url()
                        .unwrap_or(DEFAULT_BASE_URL)
                        .to_string(),
                    api_key: api_key.to_string(),
                    model: settings.api_model().unwrap_or(DEFAULT_MODEL).to_string(),
                    system_prompt: settings
                        .tutor_system_prompt()
                        .unwrap_or(DEFAULT_SYSTEM_PROMPT)
                        .to_string(),
                });
            }
        }

        if self.env_fallback {
            TutorConfig::from_env()
        } else {
            None
        }
    }

    #[must_use]
    pub async fn enabled(&self) -> bool {
        self.resolve_config().await.is_some()
    }

    /// Asks the tutor a question and always gets text back.
    pub async fn ask(&self, prompt: &str, context: Option<&str>) -> String {
        match self.generate(prompt, context).await {
            Ok(reply) => reply,
            Err(_) => TUTOR_FALLBACK_REPLY.to_string(),
        }
    }

    /// Generate a tutor reply from a prompt and optional lesson context.
    ///
    /// # Errors
    ///
    /// Returns `TutorError` when the service is unconfigured, the request
    /// fails or times out, or the response carries no text.
    pub async fn generate(
        &self,
        prompt: &str,
        context: Option<&str>,
    ) -> Result<String, TutorError> {
        let config = self.resolve_config().await.ok_or(TutorError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let user_content = match context {
            Some(context) => {
                format!("Current lesson context: {context}\nStudent question: {prompt}")
            }
            None => format!("Current lesson context: general\nStudent question: {prompt}"),
        };
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: config.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TutorError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(TutorError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::Storage;

    #[tokio::test]
    async fn unconfigured_tutor_reports_disabled() {
        let storage = Storage::in_memory();
        let tutor = TutorService::new(storage.settings).without_env_fallback();

        assert!(!tutor.enabled().await);
        let err = tutor.generate("What is NFT?", None).await.unwrap_err();
        assert!(matches!(err, TutorError::Disabled));
    }

    #[tokio::test]
    async fn ask_degrades_to_the_fallback_reply() {
        let storage = Storage::in_memory();
        let tutor = TutorService::new(storage.settings).without_env_fallback();

        let reply = tutor.ask("What is NFT?", Some("NFT Systems")).await;
        assert_eq!(reply, TUTOR_FALLBACK_REPLY);
    }

    #[test]
    fn chat_response_payload_deserializes() {
        let raw = r#"{"choices":[{"message":{"content":"  Keep the pH near 6.0.  "}}]}"#;
        let body: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = body.choices[0].message.content.as_deref();
        assert_eq!(content, Some("  Keep the pH near 6.0.  "));
    }
}
