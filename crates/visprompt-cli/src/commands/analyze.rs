//! One-shot analysis command.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;
use visprompt_core::extract::extract_prompt;
use visprompt_core::image;
use visprompt_core::session::SelectImage;
use visprompt_core::{FileClipboard, GeminiClient, Session, SessionState};

use super::ClientArgs;
use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Image file to analyze
    pub path: PathBuf,

    /// Print only the extracted prompt
    #[arg(long)]
    pub prompt_only: bool,

    /// Write the extracted prompt to this file
    #[arg(long)]
    pub copy_file: Option<PathBuf>,

    #[command(flatten)]
    pub client: ClientArgs,
}

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let client = GeminiClient::new(&args.client.config()?)?;

    let file = image::read_file(&args.path).await?;
    let media_type = file.media_type.clone();
    debug!(path = %args.path.display(), media_type = %media_type, size = file.bytes.len(), "Read image file");

    let mut session = Session::new();
    if session.select_image(file).await? == SelectImage::Rejected {
        bail!("{} is not an image ({})", args.path.display(), media_type);
    }

    if !args.prompt_only {
        println!(
            "{} Analyzing {} with {}",
            "→".dimmed(),
            args.path.display().to_string().cyan(),
            client.model()
        );
    }
    session.request_analysis(&client).await;

    let result = match session.state() {
        SessionState::Completed { result, .. } => result.clone(),
        SessionState::Failed { error, .. } => bail!("{}", error),
        other => bail!("Unexpected session state: {}", other.status()),
    };

    if args.prompt_only {
        println!("{}", extract_prompt(&result));
    } else {
        println!();
        output::print_markdown(&result);
    }

    if let Some(path) = &args.copy_file {
        session.copy_result(&FileClipboard::new(path))?;
        if !args.prompt_only {
            println!();
            println!("{} Prompt written to {}", "✓".green().bold(), path.display());
        }
    }

    Ok(())
}
