//! Directory snapshots and per-file detail reads
//!
//! Scanning takes one listing of the audio directory. Detail reads happen
//! later and may find a file gone; such failures are reported per file and
//! never abort the rest of a session.

use super::{AudioArtifact, Session};
use crate::error::{BlogcastError, Result};
use std::fs;
use std::path::Path;

/// Snapshot the audio files in `dir`
///
/// Only regular files whose extension matches `extension`
/// (case-insensitive, without the dot) are returned. Entries whose
/// metadata cannot be read are skipped with a warning. A missing directory
/// yields an empty snapshot.
///
/// # Errors
///
/// Returns `BlogcastError::Io` naming `dir` if it exists but cannot be listed
pub fn scan_audio_dir(dir: &Path, extension: &str) -> Result<Vec<AudioArtifact>> {
    if !dir.exists() {
        tracing::debug!("Audio directory {} does not exist yet", dir.display());
        return Ok(Vec::new());
    }

    let mut artifacts = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| BlogcastError::io(dir, e))? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("Skipping entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if !matches_ext {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let created = match metadata.created().or_else(|_| metadata.modified()) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("Skipping {}: no timestamp available: {}", path.display(), e);
                continue;
            }
        };

        artifacts.push(AudioArtifact::new(path, metadata.len(), created));
    }

    tracing::debug!(
        "Found {} .{} files in {}",
        artifacts.len(),
        extension,
        dir.display()
    );
    Ok(artifacts)
}

/// Read an artifact's bytes
///
/// # Errors
///
/// Returns `BlogcastError::Artifact` if the file cannot be read, e.g. it was
/// deleted after the snapshot was taken
pub fn read_artifact(artifact: &AudioArtifact) -> Result<Vec<u8>> {
    fs::read(&artifact.path).map_err(|e| {
        BlogcastError::Artifact {
            path: artifact.path.clone(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Detail view of one artifact, read at display time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDetail {
    /// File name including extension
    pub file_name: String,
    /// Part number within the session
    pub part: u32,
    /// Size observed when the file was read
    pub size: u64,
}

/// Read every member of a session, one result per artifact
///
/// A failed read yields an `Err` for that artifact only; the remaining
/// members are still read.
pub fn inspect_session(session: &Session) -> Vec<(AudioArtifact, Result<ArtifactDetail>)> {
    session
        .artifacts
        .iter()
        .map(|artifact| {
            let detail: Result<ArtifactDetail> = fs::metadata(&artifact.path)
                .map(|m| ArtifactDetail {
                    file_name: artifact.file_name(),
                    part: artifact.part,
                    size: m.len(),
                })
                .map_err(|e| {
                    tracing::warn!("Cannot read {}: {}", artifact.path.display(), e);
                    BlogcastError::Artifact {
                        path: artifact.path.clone(),
                        message: e.to_string(),
                    }
                    .into()
                });
            (artifact.clone(), detail)
        })
        .collect()
}
