//! visprompt core library
//!
//! Image intake, the interactive session state machine, the Gemini analysis
//! client and the helpers around its markdown output.

pub mod analysis;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod extract;
pub mod image;
pub mod markdown;
pub mod session;

pub use analysis::{AnalysisClient, GeminiClient};
pub use clipboard::{Clipboard, FileClipboard, MemoryClipboard};
pub use config::Config;
pub use error::{VisPromptError, VisPromptResult};
pub use image::{ImagePayload, SelectedFile};
pub use session::{Session, SessionSnapshot, SessionState, SessionStatus};
