use super::{load_artifacts, print_session};
use crate::artifacts::{group_sessions, resolve_latest_session};
use crate::cli::SessionCommand;
use crate::config::Config;
use crate::error::{BlogcastError, Result};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle session browsing commands
pub fn handle_sessions(command: SessionCommand, config: &Config) -> Result<()> {
    let artifacts = load_artifacts(config)?;
    tracing::debug!("Found {} audio file(s)", artifacts.len());

    match command {
        SessionCommand::List => {
            let sessions = group_sessions(&artifacts);
            if sessions.is_empty() {
                println!("{}", "No episodes found.".yellow());
                return Ok(());
            }

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
            table.add_row(prettytable::row![
                "Episode".bold(),
                "Parts".bold(),
                "Size".bold(),
                "Latest".bold()
            ]);

            for session in &sessions {
                table.add_row(prettytable::row![
                    session.key.cyan(),
                    session.len(),
                    format!("{:.2} MB", session.total_size_mb()),
                    session.latest_local().format("%Y-%m-%d %H:%M").to_string()
                ]);
            }

            println!("\nEpisodes ({}):", sessions.len());
            table.printstd();
            println!();
            println!(
                "Use {} to see the parts of one.",
                "blogcast sessions show <EPISODE>".cyan()
            );
            println!();
        }
        SessionCommand::Latest => match resolve_latest_session(&artifacts) {
            Some(session) => print_session(&session),
            None => println!("{}", "No episodes found.".yellow()),
        },
        SessionCommand::Show { key } => {
            let session = group_sessions(&artifacts)
                .into_iter()
                .find(|s| s.key == key)
                .ok_or(BlogcastError::SessionNotFound(key))?;
            print_session(&session);
        }
    }

    Ok(())
}
