//! Interactive session: image intake, analysis and copy.
//!
//! A [`Session`] owns the single UI state record. Selection and analysis each
//! come in two phases (`begin_*` / `finish_*`) so that a caller sharing the
//! session behind a lock never holds it across the decode or the network call.
//! Completions that were overtaken by a newer selection are discarded.

pub mod model;

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::analysis::AnalysisClient;
use crate::clipboard::Clipboard;
use crate::error::VisPromptResult;
use crate::extract::extract_prompt;
use crate::image::{self, ImagePayload, SelectedFile};

pub use model::{
    AnalysisTicket, SelectImage, SelectionTicket, SessionSnapshot, SessionState, SessionStatus,
};

/// Message stored when an analysis fails, whatever the cause.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Image analysis failed. Check your API key and network connection, then try again.";

/// How long the copied indicator stays on after a copy.
pub const COPIED_INDICATOR_DURATION: Duration = Duration::from_secs(2);

/// UI state for one user.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    /// Sequence number of the most recently started selection.
    selection_seq: u64,
    /// Bumped whenever a selection is installed or an analysis starts.
    epoch: u64,
    copied_until: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            selection_seq: 0,
            epoch: 0,
            copied_until: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        self.state.image()
    }

    pub fn result(&self) -> Option<&str> {
        self.state.result()
    }

    pub fn is_analyzing(&self) -> bool {
        self.state.is_analyzing()
    }

    /// Whether the copied indicator is currently on.
    pub fn is_copied(&self) -> bool {
        self.copied_until.is_some_and(|until| Instant::now() < until)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(&self.state, self.is_copied())
    }

    // ============================================================
    // SELECTION
    // ============================================================

    /// Select a file, decode it and move to `Ready`.
    ///
    /// Non-image files are rejected without touching the session.
    pub async fn select_image(&mut self, file: SelectedFile) -> VisPromptResult<SelectImage> {
        let Some(ticket) = self.begin_selection(&file) else {
            return Ok(SelectImage::Rejected);
        };
        let payload = image::decode_file(file).await?;
        self.finish_selection(ticket, payload);
        Ok(SelectImage::Accepted)
    }

    /// Start a selection. Returns `None` for non-image files.
    pub fn begin_selection(&mut self, file: &SelectedFile) -> Option<SelectionTicket> {
        if !file.is_image() {
            debug!(name = %file.name, media_type = %file.media_type, "Ignoring non-image file");
            return None;
        }
        self.selection_seq += 1;
        Some(SelectionTicket {
            seq: self.selection_seq,
        })
    }

    /// Install a decoded image. Returns false if a later selection has started.
    pub fn finish_selection(&mut self, ticket: SelectionTicket, payload: ImagePayload) -> bool {
        if ticket.seq != self.selection_seq {
            debug!(ticket = ticket.seq, current = self.selection_seq, "Dropping superseded selection");
            return false;
        }

        info!(media_type = %payload.mime_type(), size = payload.decoded_len(), "Image selected");
        self.state = SessionState::Ready { image: payload };
        self.epoch += 1;
        self.copied_until = None;
        true
    }

    // ============================================================
    // ANALYSIS
    // ============================================================

    /// Analyze the current image with `client`.
    ///
    /// Returns false without doing anything when there is no image or an
    /// analysis is already running. Client errors end in `Failed`.
    pub async fn request_analysis(&mut self, client: &dyn AnalysisClient) -> bool {
        let Some(ticket) = self.begin_analysis() else {
            return false;
        };
        let outcome = client.analyze(ticket.image()).await;
        self.finish_analysis(ticket, outcome)
    }

    /// Move to `Analyzing`. Returns `None` when analysis is not allowed.
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        let image = match &self.state {
            SessionState::Ready { image }
            | SessionState::Completed { image, .. }
            | SessionState::Failed { image, .. } => image.clone(),
            SessionState::Idle | SessionState::Analyzing { .. } => {
                debug!(status = %self.status(), "Analysis request ignored");
                return None;
            }
        };

        self.epoch += 1;
        self.copied_until = None;
        self.state = SessionState::Analyzing {
            image: image.clone(),
        };
        info!(epoch = self.epoch, "Analysis started");

        Some(AnalysisTicket {
            epoch: self.epoch,
            image,
        })
    }

    /// Record the outcome of an analysis.
    ///
    /// Returns false, leaving the session unchanged, if the session moved on
    /// since the ticket was issued.
    pub fn finish_analysis(&mut self, ticket: AnalysisTicket, outcome: VisPromptResult<String>) -> bool {
        if ticket.epoch != self.epoch || !self.state.is_analyzing() {
            debug!(ticket = ticket.epoch, current = self.epoch, "Dropping stale analysis outcome");
            return false;
        }

        let image = ticket.image;
        self.state = match outcome {
            Ok(result) => {
                info!(chars = result.len(), "Analysis completed");
                SessionState::Completed { image, result }
            }
            Err(e) => {
                warn!(error = %e, "Analysis failed");
                SessionState::Failed {
                    image,
                    error: ANALYSIS_FAILED_MESSAGE.to_string(),
                }
            }
        };
        true
    }

    // ============================================================
    // COPY
    // ============================================================

    /// Copy the prompt from the current result to `clipboard`.
    ///
    /// Returns the copied text, or `None` when there is no result. Each copy
    /// turns the indicator on for [`COPIED_INDICATOR_DURATION`] from now.
    pub fn copy_result(&mut self, clipboard: &dyn Clipboard) -> VisPromptResult<Option<String>> {
        let Some(result) = self.state.result() else {
            return Ok(None);
        };

        let text = extract_prompt(result).to_string();
        clipboard.write_text(&text)?;
        self.copied_until = Some(Instant::now() + COPIED_INDICATOR_DURATION);
        debug!(chars = text.len(), "Result copied");

        Ok(Some(text))
    }
}
