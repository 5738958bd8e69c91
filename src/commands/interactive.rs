//! Interactive conversion session
//!
//! A readline loop that converts URLs one after another. The current voice
//! and the last result live in the loop; nothing is persisted between runs.

use super::convert::run_conversion;
use super::{load_artifacts, print_session};
use crate::artifacts::resolve_latest_session;
use crate::config::Config;
use crate::context::ConversionContext;
use crate::error::Result;
use crate::voice::Voice;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;

/// Errors from parsing a line of interactive input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType 'help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },

    /// Voice name not in the catalogue
    #[error("Unknown voice: {0}\n\nType 'voice' to list the voices")]
    UnknownVoice(String),
}

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Convert a URL with the current voice
    Convert(String),
    /// Change the current voice
    SetVoice(Voice),
    /// List voices and show the current one
    ShowVoices,
    /// Show the most recent episode on disk
    Latest,
    /// Forget the last result
    Clear,
    /// Show conversion statistics
    Stats,
    /// Show help
    Help,
    /// Leave the session
    Exit,
}

/// Parse one line of interactive input
///
/// Commands are case-insensitive. A bare `http://` or `https://` URL is
/// shorthand for `convert <url>`.
///
/// # Examples
///
/// ```
/// use blogcast::commands::interactive::{parse_repl_command, ReplCommand};
/// use blogcast::Voice;
///
/// assert_eq!(
///     parse_repl_command("voice Nova").unwrap(),
///     ReplCommand::SetVoice(Voice::Nova)
/// );
/// assert_eq!(
///     parse_repl_command("https://example.com/post").unwrap(),
///     ReplCommand::Convert("https://example.com/post".to_string())
/// );
/// assert!(parse_repl_command("dance").is_err());
/// ```
pub fn parse_repl_command(input: &str) -> std::result::Result<ReplCommand, CommandError> {
    let trimmed = input.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };
    let head_lower = head.to_lowercase();

    if rest.is_empty() && (head_lower.starts_with("http://") || head_lower.starts_with("https://"))
    {
        return Ok(ReplCommand::Convert(head.to_string()));
    }

    match head_lower.as_str() {
        "convert" if rest.is_empty() => Err(CommandError::MissingArgument {
            command: "convert".to_string(),
            usage: "convert <url>".to_string(),
        }),
        "convert" => Ok(ReplCommand::Convert(rest.to_string())),
        "voice" | "voices" if rest.is_empty() => Ok(ReplCommand::ShowVoices),
        "voice" => rest
            .parse::<Voice>()
            .map(ReplCommand::SetVoice)
            .map_err(|_| CommandError::UnknownVoice(rest.to_string())),
        "latest" => Ok(ReplCommand::Latest),
        "clear" => Ok(ReplCommand::Clear),
        "stats" => Ok(ReplCommand::Stats),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" => Ok(ReplCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

fn print_help() {
    println!("\n{}", "Commands:".bold());
    println!("  convert <url>   Convert a blog post (or just paste the URL)");
    println!("  voice [name]    Show voices, or switch to one");
    println!("  latest          Show the most recent episode");
    println!("  clear           Forget the last result");
    println!("  stats           Show conversions so far");
    println!("  help            Show this help");
    println!("  quit            Leave");
    println!();
}

fn print_voices(current: Voice) {
    for voice in Voice::ALL {
        let marker = if voice == current { "*" } else { " " };
        println!(
            " {} {:<8} {}",
            marker.green(),
            voice.as_str().cyan(),
            voice.description()
        );
    }
    println!();
}

fn print_stats(ctx: &ConversionContext, voice: Voice) {
    println!("Conversions this session: {}", ctx.conversion_count());
    println!("Current voice: {}", voice.as_str().cyan());
    match ctx.last() {
        Some((outcome, session)) => {
            println!("Last episode: \"{}\"", outcome.title);
            let parts = session.map(|s| s.len()).unwrap_or(outcome.audio_files.len());
            println!(
                "  {} file(s), {} characters, estimated cost ${:.4}",
                parts, outcome.char_count, outcome.estimated_cost
            );
        }
        None => println!("No result kept."),
    }
    println!();
}

/// Start the interactive session
pub async fn run_interactive(config: Config) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut ctx = ConversionContext::new();
    let mut voice = config.synthesis.default_voice;

    println!("{}", "Blogcast interactive mode".bold());
    println!("Type 'help' for commands, 'quit' to leave.\n");

    loop {
        let prompt = format!("[{}] blogcast> ", voice.as_str());
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                let command = match parse_repl_command(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}\n", e.to_string().red());
                        continue;
                    }
                };

                match command {
                    ReplCommand::Convert(url) => match run_conversion(&url, voice, &config).await
                    {
                        Ok((outcome, session)) => ctx.record_success(outcome, session),
                        Err(e) => eprintln!("{}\n", format!("Error: {}", e).red()),
                    },
                    ReplCommand::SetVoice(v) => {
                        voice = v;
                        println!("Voice set to {}\n", voice.as_str().cyan());
                    }
                    ReplCommand::ShowVoices => print_voices(voice),
                    ReplCommand::Latest => {
                        match load_artifacts(&config).map(|a| resolve_latest_session(&a)) {
                            Ok(Some(session)) => print_session(&session),
                            Ok(None) => println!("{}\n", "No episodes found.".yellow()),
                            Err(e) => eprintln!("{}\n", format!("Error: {}", e).red()),
                        }
                    }
                    ReplCommand::Clear => {
                        ctx.clear();
                        println!("Cleared.\n");
                    }
                    ReplCommand::Stats => print_stats(&ctx, voice),
                    ReplCommand::Help => print_help(),
                    ReplCommand::Exit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    tracing::info!(
        "Interactive session ended after {} conversion(s)",
        ctx.conversion_count()
    );
    Ok(())
}
