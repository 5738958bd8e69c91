//! Session archive export
//!
//! Bundles the parts of one session into a single zip file so a multi-part
//! episode can be downloaded in one go.

use super::{read_artifact, Session};
use crate::error::{BlogcastError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Outcome of exporting one session
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Location of the written archive
    pub archive: PathBuf,
    /// Entry names written, in part order
    pub entries: Vec<String>,
    /// Artifacts that could not be read, with the reason
    pub failures: Vec<(PathBuf, String)>,
}

impl ExportReport {
    /// True when every artifact made it into the archive
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Write `session` to a zip archive at `dest`
///
/// Entries are stored uncompressed under their file names, in part order.
/// An artifact that cannot be read is recorded in the report and skipped;
/// the remaining artifacts are still exported.
///
/// # Errors
///
/// Returns error if the session is empty or the archive itself cannot be
/// created or finalised
pub fn export_session(session: &Session, dest: &Path) -> Result<ExportReport> {
    if session.is_empty() {
        return Err(BlogcastError::Export(format!(
            "session '{}' has no audio files",
            session.key
        ))
        .into());
    }

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| BlogcastError::io(parent, e))?;
        }
    }

    let file = File::create(dest).map_err(|e| BlogcastError::io(dest, e))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let archive_error = |e: &dyn std::fmt::Display| {
        BlogcastError::Export(format!("cannot write {}: {}", dest.display(), e))
    };

    let mut report = ExportReport {
        archive: dest.to_path_buf(),
        ..Default::default()
    };

    for artifact in &session.artifacts {
        let bytes = match read_artifact(artifact) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Leaving {} out of archive: {}", artifact.file_name(), e);
                report.failures.push((artifact.path.clone(), e.to_string()));
                continue;
            }
        };

        let name = artifact.file_name();
        writer
            .start_file(name.clone(), options)
            .map_err(|e| archive_error(&e))?;
        writer.write_all(&bytes).map_err(|e| archive_error(&e))?;
        report.entries.push(name);
    }

    writer.finish().map_err(|e| archive_error(&e))?;

    tracing::info!(
        "Exported session '{}' to {} ({} entries, {} failed)",
        session.key,
        dest.display(),
        report.entries.len(),
        report.failures.len()
    );

    Ok(report)
}
