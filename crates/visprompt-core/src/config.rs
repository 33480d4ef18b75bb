//! Runtime configuration read from the process environment.

use std::time::Duration;

use crate::error::{VisPromptError, VisPromptResult};

/// Environment variable holding the Gemini credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default language for the cloning prompt section.
pub const DEFAULT_PROMPT_LANGUAGE: &str = "English";

/// Default language for the visual breakdown section.
pub const DEFAULT_BREAKDOWN_LANGUAGE: &str = "Simplified Chinese";

/// Settings for the analysis client.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub prompt_language: String,
    pub breakdown_language: String,
    /// Unset means the request waits as long as the service takes.
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Build a config with defaults for everything except the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            prompt_language: DEFAULT_PROMPT_LANGUAGE.to_string(),
            breakdown_language: DEFAULT_BREAKDOWN_LANGUAGE.to_string(),
            request_timeout: None,
        }
    }

    /// Read the config from the process environment.
    ///
    /// Uses `GEMINI_API_KEY` (required), `GEMINI_BASE_URL`, `VISPROMPT_MODEL`,
    /// `VISPROMPT_PROMPT_LANGUAGE`, `VISPROMPT_BREAKDOWN_LANGUAGE` and
    /// `VISPROMPT_TIMEOUT_SECS`.
    pub fn from_env() -> VisPromptResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> VisPromptResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(VisPromptError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Some(url) = get("GEMINI_BASE_URL") {
            config.base_url = url;
        }
        if let Some(model) = get("VISPROMPT_MODEL") {
            config.model = model;
        }
        if let Some(lang) = get("VISPROMPT_PROMPT_LANGUAGE") {
            config.prompt_language = lang;
        }
        if let Some(lang) = get("VISPROMPT_BREAKDOWN_LANGUAGE") {
            config.breakdown_language = lang;
        }
        if let Some(secs) = get("VISPROMPT_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                VisPromptError::config(format!("VISPROMPT_TIMEOUT_SECS must be a number, got '{}'", secs))
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
