//! Clipboard targets for the copy action.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{VisPromptError, VisPromptResult};

/// Somewhere copied text can be placed.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> VisPromptResult<()>;
}

/// Keeps the most recently copied text in memory.
///
/// The web server hands this text to the browser, which owns the real
/// clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last copied text, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> VisPromptResult<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| VisPromptError::clipboard("clipboard lock poisoned"))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

/// Writes copied text to a file, replacing its contents.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&self, text: &str) -> VisPromptResult<()> {
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}
