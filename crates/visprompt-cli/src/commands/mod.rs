//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use visprompt_core::config::{self, Config};

pub mod analyze;
pub mod serve;

/// visprompt - turn an image into a reusable generation prompt
#[derive(Parser)]
#[command(name = "visprompt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web front-end
    Serve(serve::ServeArgs),

    /// Analyze one image file and print the result
    Analyze(analyze::AnalyzeArgs),
}

/// Gemini client settings shared by all commands.
#[derive(Args)]
pub struct ClientArgs {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model to use
    #[arg(long, env = "VISPROMPT_MODEL")]
    pub model: Option<String>,
}

impl ClientArgs {
    /// Build the client config; flags win over the environment.
    pub fn config(&self) -> Result<Config> {
        let config = Config::from_lookup(|key| {
            let flag = match key {
                config::API_KEY_VAR => self.api_key.clone(),
                "VISPROMPT_MODEL" => self.model.clone(),
                _ => None,
            };
            flag.or_else(|| std::env::var(key).ok())
        })?;
        Ok(config)
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Analyze(args) => analyze::execute(args).await,
        }
    }
}
