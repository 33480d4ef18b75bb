//! End-to-end session behaviour with a stubbed analysis client.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use visprompt_core::session::{SelectImage, ANALYSIS_FAILED_MESSAGE, COPIED_INDICATOR_DURATION};
use visprompt_core::{
    AnalysisClient, ImagePayload, MemoryClipboard, SelectedFile, Session, SessionStatus,
    VisPromptError, VisPromptResult,
};

/// Returns a canned answer, or fails like an unreachable service.
struct StubClient {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl StubClient {
    fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisClient for StubClient {
    async fn analyze(&self, _image: &ImagePayload) -> VisPromptResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(VisPromptError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

fn photo_png() -> SelectedFile {
    SelectedFile::new("photo.png", "image/png", vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a])
}

const PROMPT_REPLY: &str = "### Prompt\n```prompt\ncat on a chair\n```";

#[tokio::test]
async fn photo_analysis_and_copy() {
    let mut session = Session::new();

    let outcome = session.select_image(photo_png()).await.unwrap();
    assert_eq!(outcome, SelectImage::Accepted);
    assert_eq!(session.status(), SessionStatus::Ready);

    let client = StubClient::replying(PROMPT_REPLY);
    assert!(session.request_analysis(&client).await);
    assert_eq!(session.status(), SessionStatus::Completed);
    assert_eq!(session.result(), Some(PROMPT_REPLY));

    let clipboard = MemoryClipboard::new();
    let copied = session.copy_result(&clipboard).unwrap();
    assert_eq!(copied.as_deref(), Some("cat on a chair"));
    assert_eq!(clipboard.contents().as_deref(), Some("cat on a chair"));
}

#[tokio::test]
async fn text_file_is_rejected() {
    let mut session = Session::new();
    let notes = SelectedFile::new("notes.txt", "text/plain", b"shopping list".to_vec());

    let outcome = session.select_image(notes).await.unwrap();
    assert_eq!(outcome, SelectImage::Rejected);
    assert_eq!(session.status(), SessionStatus::Idle);
    assert!(session.image().is_none());
}

#[tokio::test]
async fn non_image_leaves_existing_state_alone() {
    let mut session = Session::new();
    session.select_image(photo_png()).await.unwrap();
    session
        .request_analysis(&StubClient::replying("done"))
        .await;
    let before = session.state().clone();

    for media_type in ["text/plain", "application/pdf", "video/mp4", ""] {
        let file = SelectedFile::new("file", media_type, vec![1, 2, 3]);
        assert_eq!(session.select_image(file).await.unwrap(), SelectImage::Rejected);
        assert_eq!(session.state(), &before);
    }
}

#[tokio::test]
async fn new_selection_clears_result_and_keeps_media_type() {
    let mut session = Session::new();
    session.select_image(photo_png()).await.unwrap();
    session
        .request_analysis(&StubClient::replying("first result"))
        .await;
    assert_eq!(session.status(), SessionStatus::Completed);

    let jpeg = SelectedFile::new("next.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff]);
    session.select_image(jpeg).await.unwrap();

    assert_eq!(session.status(), SessionStatus::Ready);
    assert_eq!(session.image().unwrap().mime_type(), "image/jpeg");
    assert!(session.result().is_none());
}

#[tokio::test]
async fn analysis_without_image_is_noop() {
    let mut session = Session::new();
    let client = StubClient::replying("unused");

    assert!(!session.request_analysis(&client).await);
    assert_eq!(session.status(), SessionStatus::Idle);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn analysis_while_analyzing_is_noop() {
    let mut session = Session::new();
    session.select_image(photo_png()).await.unwrap();
    let _in_flight = session.begin_analysis().unwrap();

    let client = StubClient::replying("unused");
    assert!(!session.request_analysis(&client).await);
    assert_eq!(session.status(), SessionStatus::Analyzing);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn result_is_stored_verbatim() {
    let reply = "  leading spaces\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\ntrailing newline\n";
    let mut session = Session::new();
    session.select_image(photo_png()).await.unwrap();
    session.request_analysis(&StubClient::replying(reply)).await;

    assert_eq!(session.result(), Some(reply));
}

#[tokio::test]
async fn transport_failure_ends_in_failed() {
    let mut session = Session::new();
    session.select_image(photo_png()).await.unwrap();

    let client = StubClient::failing();
    assert!(session.request_analysis(&client).await);

    assert_eq!(session.status(), SessionStatus::Failed);
    assert!(!session.is_analyzing());
    assert_eq!(session.result(), Some(ANALYSIS_FAILED_MESSAGE));
    assert!(!ANALYSIS_FAILED_MESSAGE.is_empty());
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn copy_without_fence_copies_everything() {
    let reply = "A cat sitting on a wooden chair, soft window light.";
    let mut session = Session::new();
    session.select_image(photo_png()).await.unwrap();
    session.request_analysis(&StubClient::replying(reply)).await;

    let clipboard = MemoryClipboard::new();
    session.copy_result(&clipboard).unwrap();
    assert_eq!(clipboard.contents().as_deref(), Some(reply));
}

#[tokio::test(start_paused = true)]
async fn copied_indicator_turns_off_after_window() {
    let mut session = Session::new();
    session.select_image(photo_png()).await.unwrap();
    session
        .request_analysis(&StubClient::replying(PROMPT_REPLY))
        .await;

    let clipboard = MemoryClipboard::new();
    session.copy_result(&clipboard).unwrap();
    assert!(session.is_copied());
    assert!(session.snapshot().copied);

    tokio::time::advance(Duration::from_millis(500)).await;
    session.copy_result(&clipboard).unwrap();
    tokio::time::advance(Duration::from_millis(500)).await;
    session.copy_result(&clipboard).unwrap();
    assert!(session.is_copied());

    tokio::time::advance(COPIED_INDICATOR_DURATION + Duration::from_millis(1)).await;
    assert!(!session.is_copied());
    assert!(!session.snapshot().copied);
}
