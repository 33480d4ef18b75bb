//! Analysis client.
//!
//! One request per analysis, no retry. Failures are reported as a single
//! error and never as partial text.

pub mod gemini;
pub mod model;
pub mod prompt;

use async_trait::async_trait;

use crate::error::VisPromptResult;
use crate::image::ImagePayload;

pub use gemini::GeminiClient;

/// Turns an image into descriptive markdown text.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Analyze one image and return the generated text unchanged.
    async fn analyze(&self, image: &ImagePayload) -> VisPromptResult<String>;
}
