//! Image intake.
//!
//! Validates declared media types and turns selected files into
//! in-memory data URI payloads.

pub mod model;

use std::path::Path;

use tracing::debug;

use crate::error::{VisPromptError, VisPromptResult};

pub use model::{ImagePayload, SelectedFile};

/// Whether a declared media type belongs to the image category.
///
/// A plain prefix check, the same test the page applies to `file.type`.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// Decode a selected file into a payload off the async executor.
pub async fn decode_file(file: SelectedFile) -> VisPromptResult<ImagePayload> {
    debug!(name = %file.name, media_type = %file.media_type, size = file.bytes.len(), "Decoding image");
    tokio::task::spawn_blocking(move || ImagePayload::from_bytes(&file.media_type, &file.bytes))
        .await
        .map_err(|e| VisPromptError::Io(std::io::Error::other(e)))?
}

/// Read a file from disk, declaring its media type from the extension.
pub async fn read_file(path: &Path) -> VisPromptResult<SelectedFile> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(SelectedFile::new(name, media_type_from_path(path), bytes))
}

/// Guess a media type from a file extension.
pub fn media_type_from_path(path: &Path) -> String {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "txt" | "md" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_media_types() {
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("image/svg+xml"));
        assert!(is_image_media_type("image/"));
        assert!(!is_image_media_type("text/plain"));
        assert!(!is_image_media_type("application/octet-stream"));
        assert!(!is_image_media_type(""));
        assert!(!is_image_media_type("imagery/png"));
    }

    #[test]
    fn test_media_type_check_is_exact_prefix() {
        assert!(!is_image_media_type("IMAGE/JPEG"));
        assert!(!is_image_media_type(" image/png"));
    }

    #[tokio::test]
    async fn test_decode_file_accepts_bare_image_type() {
        let file = SelectedFile::new("blob", "image/", vec![1, 2, 3]);
        assert!(file.is_image());
        let payload = decode_file(file).await.unwrap();
        assert_eq!(payload.mime_type(), "image/");
        assert!(payload.data_uri().starts_with("data:image/;base64,"));
    }

    #[test]
    fn test_media_type_from_path() {
        assert_eq!(media_type_from_path(Path::new("photo.PNG")), "image/png");
        assert_eq!(media_type_from_path(Path::new("a/b.jpeg")), "image/jpeg");
        assert_eq!(media_type_from_path(Path::new("notes.txt")), "text/plain");
        assert_eq!(media_type_from_path(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_decode_file() {
        let file = SelectedFile::new("photo.png", "image/png", vec![0x89, b'P', b'N', b'G']);
        let payload = decode_file(file).await.unwrap();
        assert_eq!(payload.mime_type(), "image/png");
        assert!(payload.data_uri().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_decode_file_rejects_text() {
        let file = SelectedFile::new("notes.txt", "text/plain", b"hi".to_vec());
        assert!(decode_file(file).await.is_err());
    }
}
