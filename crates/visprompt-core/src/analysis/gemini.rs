//! Gemini API client for image analysis.
//!
//! Sends the image inline with the fixed instruction to
//! `models/{model}:generateContent` and returns the generated text verbatim.

use async_trait::async_trait;
use tracing::debug;

use super::model::{Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part};
use super::prompt::build_instruction;
use super::AnalysisClient;
use crate::config::Config;
use crate::error::{VisPromptError, VisPromptResult};
use crate::image::ImagePayload;

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    instruction: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a client from a config.
    ///
    /// Fails with [`VisPromptError::MissingApiKey`] when the key is blank.
    pub fn new(config: &Config) -> VisPromptResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(VisPromptError::MissingApiKey);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            instruction: build_instruction(&config.prompt_language, &config.breakdown_language),
            client,
        })
    }

    /// Create a client from the process environment.
    pub fn from_env() -> VisPromptResult<Self> {
        Self::new(&Config::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(&self, image: &ImagePayload) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type().to_string(),
                            data: image.base64_data().to_string(),
                        },
                    },
                    Part::Text {
                        text: self.instruction.clone(),
                    },
                ],
            }],
        }
    }
}

#[async_trait]
impl AnalysisClient for GeminiClient {
    async fn analyze(&self, image: &ImagePayload) -> VisPromptResult<String> {
        let request = self.build_request(image);

        debug!(model = %self.model, media_type = %image.mime_type(), size = image.decoded_len(), "Calling Gemini API");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VisPromptError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = serde_json::from_slice(&response.bytes().await?)?;
        let text = body.text().ok_or(VisPromptError::EmptyResponse)?;

        debug!(chars = text.len(), "Gemini analysis complete");
        Ok(text)
    }
}
