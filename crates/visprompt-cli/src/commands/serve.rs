//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use visprompt_core::GeminiClient;

use super::ClientArgs;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log
    #[arg(long, default_value = "visprompt.log")]
    pub log_file: PathBuf,

    #[command(flatten)]
    pub client: ClientArgs,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = args.client.config()?;
    let client = GeminiClient::new(&config)?;

    println!();
    println!("  {} {}", "visprompt".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}       http://{}:{}", "Page".green(), args.host, args.port);
    println!("  {}        http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}  ws://{}:{}/ws", "WebSocket".green(), args.host, args.port);
    println!("  {}      {}", "Model".green(), client.model());
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    visprompt_web::run_server(Arc::new(client), &args.host, args.port).await?;

    Ok(())
}
