//! Blogcast - blog post to podcast CLI
//!
#![doc = "Blogcast - blog post to podcast CLI"]
#![doc = "Main entry point for the Blogcast application."]

use anyhow::Result;

use blogcast::cli::{Cli, Commands};
use blogcast::commands;
use blogcast::config::Config;
use blogcast::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may live in a local .env file
    let dotenv = dotenvy::dotenv();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_logging(cli.verbose, cli.json_logs)?;
    if let Ok(path) = &dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Convert { url, voice } => {
            tracing::info!("Starting conversion");
            commands::convert::handle_convert(&url, voice, &config).await?;
            Ok(())
        }
        Commands::Sessions { command } => {
            commands::sessions::handle_sessions(command, &config)?;
            Ok(())
        }
        Commands::Export { session, output } => {
            commands::export::handle_export(session.as_deref(), &output, &config)?;
            Ok(())
        }
        Commands::Status => {
            commands::status::handle_status(&config)?;
            Ok(())
        }
        Commands::Voices => {
            commands::voices::handle_voices(&config);
            Ok(())
        }
        Commands::Interactive => {
            tracing::info!("Starting interactive mode");
            commands::interactive::run_interactive(config).await?;
            Ok(())
        }
    }
}
