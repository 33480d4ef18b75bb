//! HTML page handler.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use visprompt_core::SessionSnapshot;

use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    status: String,
    image_data_uri: String,
    result_html: String,
    has_image: bool,
    has_result: bool,
    is_analyzing: bool,
    copied: bool,
}

impl IndexTemplate {
    fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            status: snapshot.status.to_string(),
            image_data_uri: snapshot.image_data_uri.unwrap_or_default(),
            has_result: snapshot.result_html.is_some(),
            result_html: snapshot.result_html.unwrap_or_default(),
            has_image: snapshot.has_image,
            is_analyzing: snapshot.is_analyzing,
            copied: snapshot.copied,
        }
    }
}

/// GET / - Render the upload and analysis page.
pub async fn index(State(state): State<AppState>) -> Response {
    let template = IndexTemplate::from_snapshot(state.snapshot().await);
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("Template error: {}", e)),
        )
            .into_response(),
    }
}
