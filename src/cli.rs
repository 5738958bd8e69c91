//! Command-line interface definition for Blogcast
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for conversion, browsing generated episodes,
//! exporting them, and checking the environment.

use crate::voice::Voice;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Blogcast - turn blog posts into narrated podcast episodes
#[derive(Parser, Debug, Clone)]
#[command(name = "blogcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Override the output directory root
    #[arg(short, long, env = "BLOGCAST_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Blogcast
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert a blog post into a podcast episode
    Convert {
        /// URL of the blog post to convert
        #[arg(short, long)]
        url: String,

        /// Voice to use for text-to-speech (defaults to the configured voice)
        #[arg(long, value_parser = parse_voice)]
        voice: Option<Voice>,
    },

    /// Browse generated episodes
    Sessions {
        /// Session subcommand
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Bundle an episode's audio files into a zip archive
    Export {
        /// Session key to export (defaults to the most recent episode)
        #[arg(short, long)]
        session: Option<String>,

        /// Destination archive path
        #[arg(long)]
        output: PathBuf,
    },

    /// Show API key status and output directory contents
    Status,

    /// List the available voices
    Voices,

    /// Start an interactive conversion session
    Interactive,
}

/// Session browsing subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// List every episode, newest first
    List,

    /// Show the parts of the most recent episode
    Latest,

    /// Show the parts of one episode
    Show {
        /// Session key
        key: String,
    },
}

fn parse_voice(s: &str) -> Result<Voice, String> {
    s.parse::<Voice>().map_err(|e| e.to_string())
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            json_logs: false,
            output_dir: None,
            command: Commands::Status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::try_parse_from([
            "blogcast",
            "convert",
            "--url",
            "https://example.com/post",
            "--voice",
            "nova",
        ])
        .unwrap();
        if let Commands::Convert { url, voice } = cli.command {
            assert_eq!(url, "https://example.com/post");
            assert_eq!(voice, Some(Voice::Nova));
        } else {
            panic!("Expected Convert command");
        }
    }

    #[test]
    fn test_cli_parse_convert_without_voice() {
        let cli = Cli::try_parse_from(["blogcast", "convert", "-u", "https://example.com"]).unwrap();
        if let Commands::Convert { voice, .. } = cli.command {
            assert_eq!(voice, None);
        } else {
            panic!("Expected Convert command");
        }
    }

    #[test]
    fn test_cli_rejects_unknown_voice() {
        let result = Cli::try_parse_from([
            "blogcast",
            "convert",
            "--url",
            "https://example.com",
            "--voice",
            "robot",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_convert_requires_url() {
        assert!(Cli::try_parse_from(["blogcast", "convert"]).is_err());
    }

    #[test]
    fn test_cli_parse_sessions() {
        let cli = Cli::try_parse_from(["blogcast", "sessions", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Sessions {
                command: SessionCommand::List
            }
        ));

        let cli = Cli::try_parse_from(["blogcast", "sessions", "show", "ep"]).unwrap();
        if let Commands::Sessions {
            command: SessionCommand::Show { key },
        } = cli.command
        {
            assert_eq!(key, "ep");
        } else {
            panic!("Expected Sessions Show command");
        }
    }

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::try_parse_from(["blogcast", "export", "--output", "ep.zip"]).unwrap();
        if let Commands::Export { session, output } = cli.command {
            assert_eq!(session, None);
            assert_eq!(output, PathBuf::from("ep.zip"));
        } else {
            panic!("Expected Export command");
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "blogcast",
            "--verbose",
            "--json-logs",
            "--output-dir",
            "/tmp/out",
            "status",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.json_logs);
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
    }
}
