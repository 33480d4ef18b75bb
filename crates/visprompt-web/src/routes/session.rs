//! Session API handlers.
//!
//! The session lock is never held across the image decode or the Gemini call.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use visprompt_core::image::{self, SelectedFile};
use visprompt_core::session::COPIED_INDICATOR_DURATION;
use visprompt_core::SessionSnapshot;

use crate::state::{AppState, WebSocketMessage};

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Serialize, Deserialize)]
pub struct CopyResponse {
    pub text: String,
}

/// GET /api/state - Current session snapshot.
pub async fn get_state(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.snapshot().await)
}

/// POST /api/image - Select an image (multipart field `image`).
///
/// Non-image files answer `204 No Content` and leave the session untouched.
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, (StatusCode, String)> {
    let file = read_image_field(multipart).await?;

    let ticket = state.session.lock().await.begin_selection(&file);
    let Some(ticket) = ticket else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let payload = image::decode_file(file)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let snapshot = {
        let mut session = state.session.lock().await;
        session.finish_selection(ticket, payload);
        session.snapshot()
    };
    state.broadcast(WebSocketMessage::StateChanged(snapshot.clone()));

    Ok(Json(snapshot).into_response())
}

/// POST /api/analyze - Start analyzing the current image.
///
/// Returns immediately with the `analyzing` snapshot; the outcome arrives over
/// the WebSocket and via `GET /api/state`.
pub async fn analyze(
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, (StatusCode, String)> {
    let (ticket, snapshot) = {
        let mut session = state.session.lock().await;
        let ticket = session.begin_analysis().ok_or_else(|| {
            (
                StatusCode::CONFLICT,
                "No image to analyze or analysis already running".to_string(),
            )
        })?;
        (ticket, session.snapshot())
    };
    state.broadcast(WebSocketMessage::StateChanged(snapshot.clone()));

    let task_state = state.clone();
    tokio::spawn(async move {
        let outcome = task_state.client.analyze(ticket.image()).await;
        let applied = task_state.session.lock().await.finish_analysis(ticket, outcome);
        if applied {
            task_state.publish().await;
        }
    });

    Ok(Json(snapshot))
}

/// POST /api/copy - Extract the prompt from the result.
///
/// The page writes the returned text to the browser clipboard.
pub async fn copy(
    State(state): State<AppState>,
) -> Result<Json<CopyResponse>, (StatusCode, String)> {
    let copied = state
        .session
        .lock()
        .await
        .copy_result(state.clipboard.as_ref())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let text = copied.ok_or_else(|| (StatusCode::CONFLICT, "No result to copy".to_string()))?;
    state.publish().await;

    // Push the indicator turning off once its window has passed.
    let task_state = state.clone();
    tokio::spawn(async move {
        tokio::time::sleep(COPIED_INDICATOR_DURATION).await;
        task_state.publish().await;
    });

    Ok(Json(CopyResponse { text }))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

async fn read_image_field(mut multipart: Multipart) -> Result<SelectedFile, (StatusCode, String)> {
    let bad_request = |e: axum::extract::multipart::MultipartError| (StatusCode::BAD_REQUEST, e.to_string());

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        if field.name() != Some(IMAGE_FIELD) {
            debug!(name = ?field.name(), "Skipping multipart field");
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let media_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(bad_request)?;

        debug!(name = %name, media_type = %media_type, size = bytes.len(), "Received upload");
        return Ok(SelectedFile::new(name, media_type, bytes.to_vec()));
    }

    warn!("Upload without an '{}' field", IMAGE_FIELD);
    Err((
        StatusCode::BAD_REQUEST,
        format!("Missing multipart field '{}'", IMAGE_FIELD),
    ))
}
