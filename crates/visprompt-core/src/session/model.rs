//! Session state models.

use serde::{Deserialize, Serialize};

use crate::image::ImagePayload;
use crate::markdown::render_markdown;

/// Where the session is in the select → analyze → copy flow.
///
/// Every state past `Idle` owns the current image, so an analysis result can
/// never exist without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Ready { image: ImagePayload },
    Analyzing { image: ImagePayload },
    Completed { image: ImagePayload, result: String },
    Failed { image: ImagePayload, error: String },
}

/// Fieldless mirror of [`SessionState`] for display and JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Ready,
    Analyzing,
    Completed,
    Failed,
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        match self {
            Self::Idle => SessionStatus::Idle,
            Self::Ready { .. } => SessionStatus::Ready,
            Self::Analyzing { .. } => SessionStatus::Analyzing,
            Self::Completed { .. } => SessionStatus::Completed,
            Self::Failed { .. } => SessionStatus::Failed,
        }
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        match self {
            Self::Idle => None,
            Self::Ready { image }
            | Self::Analyzing { image }
            | Self::Completed { image, .. }
            | Self::Failed { image, .. } => Some(image),
        }
    }

    /// Result text shown to the user: the analysis or the failure message.
    pub fn result(&self) -> Option<&str> {
        match self {
            Self::Completed { result, .. } => Some(result.as_str()),
            Self::Failed { error, .. } => Some(error.as_str()),
            _ => None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, Self::Analyzing { .. })
    }
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Analyzing => "analyzing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`super::Session::select_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectImage {
    Accepted,
    /// Not an image; the session was left untouched.
    Rejected,
}

/// Issued when a selection starts; redeemed once the file is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    pub(crate) seq: u64,
}

/// Issued when an analysis starts; redeemed with its outcome.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub(crate) epoch: u64,
    pub(crate) image: ImagePayload,
}

impl AnalysisTicket {
    /// The image to analyze.
    pub fn image(&self) -> &ImagePayload {
        &self.image
    }
}

/// Read-only view of a session for the web API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub has_image: bool,
    pub image_data_uri: Option<String>,
    pub mime_type: Option<String>,
    pub is_analyzing: bool,
    pub result: Option<String>,
    pub result_html: Option<String>,
    pub copied: bool,
}

impl SessionSnapshot {
    pub(crate) fn new(state: &SessionState, copied: bool) -> Self {
        let image = state.image();
        let result = state.result();
        Self {
            status: state.status(),
            has_image: image.is_some(),
            image_data_uri: image.map(|i| i.data_uri().to_string()),
            mime_type: image.map(|i| i.mime_type().to_string()),
            is_analyzing: state.is_analyzing(),
            result: result.map(str::to_string),
            result_html: result.map(render_markdown),
            copied,
        }
    }
}
