//! Image intake models.

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::is_image_media_type;
use crate::error::{VisPromptError, VisPromptResult};

/// A file as handed over by the user, before it is decoded.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Whether the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }
}

/// An image held in memory as a base64 data URI.
///
/// The media type always starts with `image/`; constructors reject anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    data_uri: String,
    mime_type: String,
}

impl ImagePayload {
    /// Encode raw bytes into a payload.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> VisPromptResult<Self> {
        if !is_image_media_type(mime_type) {
            return Err(VisPromptError::InvalidMediaType(mime_type.to_string()));
        }

        let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(Self {
            data_uri: format!("data:{};base64,{}", mime_type, b64),
            mime_type: mime_type.to_string(),
        })
    }

    /// Parse a `data:<mime>;base64,<data>` URI.
    pub fn from_data_uri(uri: &str) -> VisPromptResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| VisPromptError::InvalidDataUri("missing 'data:' prefix".to_string()))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| VisPromptError::InvalidDataUri("missing ',' separator".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| VisPromptError::InvalidDataUri("only base64 data URIs are supported".to_string()))?;

        if !is_image_media_type(mime_type) {
            return Err(VisPromptError::InvalidMediaType(mime_type.to_string()));
        }
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| VisPromptError::InvalidDataUri(e.to_string()))?;

        Ok(Self {
            data_uri: uri.to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    /// The full data URI.
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 portion of the data URI.
    pub fn base64_data(&self) -> &str {
        self.data_uri
            .split_once(',')
            .map(|(_, data)| data)
            .unwrap_or_default()
    }

    /// Size of the decoded image in bytes.
    pub fn decoded_len(&self) -> usize {
        let data = self.base64_data();
        let padding = data.bytes().rev().take_while(|b| *b == b'=').count();
        (data.len() / 4) * 3 - padding
    }
}
