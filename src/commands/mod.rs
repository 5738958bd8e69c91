/*!
Command handlers for the CLI

Each subcommand of `blogcast` has a handler here:

- `convert`     — run the pipeline for one URL
- `sessions`    — browse generated episodes
- `export`      — zip an episode's audio files
- `status`      — API key presence and output directory contents
- `voices`      — the voice catalogue
- `interactive` — REPL over repeated conversions

Handlers take the loaded [`Config`] and print to stdout; the library
modules they call never print.
*/

pub mod convert;
pub mod export;
pub mod interactive;
pub mod sessions;
pub mod status;
pub mod voices;

use crate::artifacts::{inspect_session, scan_audio_dir, AudioArtifact, Session};
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;
use prettytable::{format, Table};

/// Snapshot the configured audio directory
pub(crate) fn load_artifacts(config: &Config) -> Result<Vec<AudioArtifact>> {
    scan_audio_dir(&config.output.audio_dir(), &config.output.audio_extension)
}

/// Print one session's parts as a table
///
/// Each file is read at display time; a file that has gone missing or cannot
/// be read is reported in its own row and the rest are still shown.
pub(crate) fn print_session(session: &Session) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "Part".bold(),
        "File".bold(),
        "Size".bold(),
        "Created".bold()
    ]);

    let mut unreadable = 0;
    for (artifact, detail) in inspect_session(session) {
        let created = artifact.created_local().format("%Y-%m-%d %H:%M:%S").to_string();
        match detail {
            Ok(detail) => {
                table.add_row(prettytable::row![
                    detail.part,
                    detail.file_name.cyan(),
                    format!("{:.2} MB", detail.size as f64 / (1024.0 * 1024.0)),
                    created
                ]);
            }
            Err(e) => {
                unreadable += 1;
                table.add_row(prettytable::row![
                    artifact.part,
                    artifact.file_name().red(),
                    "-",
                    format!("{}", e).red()
                ]);
            }
        }
    }

    let kind = if session.is_multi_part() {
        format!("{} parts", session.len())
    } else {
        "single file".to_string()
    };
    println!("\nEpisode {} ({}):", session.key.cyan(), kind);
    table.printstd();
    println!(
        "Total: {:.2} MB, latest {}",
        session.total_size_mb(),
        session.latest_local().format("%Y-%m-%d %H:%M:%S")
    );
    if unreadable > 0 {
        println!(
            "{}",
            format!("{} file(s) could not be read", unreadable).yellow()
        );
    }
    println!();
}
