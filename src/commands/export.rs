use super::load_artifacts;
use crate::artifacts::{export_session, group_sessions, resolve_latest_session};
use crate::config::Config;
use crate::error::{BlogcastError, Result};
use colored::Colorize;
use std::path::Path;

/// Export one episode (by key, or the most recent) to a zip archive
pub fn handle_export(session_key: Option<&str>, output: &Path, config: &Config) -> Result<()> {
    let artifacts = load_artifacts(config)?;

    let session = match session_key {
        Some(key) => group_sessions(&artifacts)
            .into_iter()
            .find(|s| s.key == key)
            .ok_or_else(|| BlogcastError::SessionNotFound(key.to_string()))?,
        None => resolve_latest_session(&artifacts).ok_or_else(|| {
            BlogcastError::Export("No audio files found to export".to_string())
        })?,
    };

    tracing::info!(
        "Exporting episode {} ({} file(s)) to {}",
        session.key,
        session.len(),
        output.display()
    );
    let report = export_session(&session, output)?;

    println!(
        "{}",
        format!(
            "Wrote {} ({} of {} file(s))",
            report.archive.display(),
            report.entries.len(),
            session.len()
        )
        .green()
    );
    for (path, reason) in &report.failures {
        eprintln!("{}", format!("Skipped {}: {}", path.display(), reason).red());
    }
    if !report.is_complete() {
        println!("{}", "The archive is incomplete.".yellow());
    }

    Ok(())
}
