//! Generated audio artifacts and the episodes they belong to
//!
//! Every conversion writes one or more audio files into a flat output
//! directory. Nothing records which files belong together; episodes are
//! reconstructed from file names on every query:
//!
//! - `naming`: the filename conventions (`<base>_part<N>`, `part<N>_<base>`)
//! - `session`: grouping artifacts into sessions and finding the latest one
//! - `scan`: taking a snapshot of the directory and reading artifact bytes
//! - `export`: bundling a session into a zip archive

pub mod export;
pub mod naming;
pub mod scan;
pub mod session;

pub use export::{export_session, ExportReport};
pub use naming::{classify, Classification, PartPattern};
pub use scan::{inspect_session, read_artifact, scan_audio_dir, ArtifactDetail};
pub use session::{group_sessions, resolve_latest_session};

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One generated audio file and its filesystem metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    /// Location of the file
    pub path: PathBuf,
    /// Size in bytes at scan time
    pub size: u64,
    /// Creation time (modification time where creation time is unavailable)
    pub created: SystemTime,
    /// Part number inferred from the file name
    pub part: u32,
}

impl AudioArtifact {
    /// Create an artifact, inferring its part number from the file name
    ///
    /// # Examples
    ///
    /// ```
    /// use blogcast::artifacts::AudioArtifact;
    /// use std::time::SystemTime;
    ///
    /// let a = AudioArtifact::new("out/ep_part2.mp3", 1024, SystemTime::UNIX_EPOCH);
    /// assert_eq!(a.part, 2);
    /// assert_eq!(a.file_name(), "ep_part2.mp3");
    /// ```
    pub fn new(path: impl Into<PathBuf>, size: u64, created: SystemTime) -> Self {
        let path = path.into();
        let part = classify(&stem_of(&path)).part;
        Self {
            path,
            size,
            created,
            part,
        }
    }

    /// File name including extension
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name without extension
    pub fn stem(&self) -> String {
        stem_of(&self.path)
    }

    /// Classification of this artifact's file name
    pub fn classification(&self) -> Classification {
        classify(&self.stem())
    }

    /// Size in megabytes, for display
    pub fn size_mb(&self) -> f64 {
        bytes_to_mb(self.size)
    }

    /// Creation time in local time, for display
    pub fn created_local(&self) -> DateTime<Local> {
        DateTime::<Local>::from(self.created)
    }
}

/// Artifacts believed to belong to one conversion
///
/// Never persisted; rebuilt from a directory snapshot on every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Session key shared by every member
    pub key: String,
    /// Members ordered by part number, ties broken by file name
    pub artifacts: Vec<AudioArtifact>,
    /// Sum of member sizes in bytes
    pub total_size: u64,
    /// Most recent member creation time
    pub latest: SystemTime,
}

impl Session {
    /// Build a session from its members, ordering them and computing aggregates
    pub fn new(key: impl Into<String>, mut artifacts: Vec<AudioArtifact>) -> Self {
        sort_by_part(&mut artifacts);
        let total_size = artifacts.iter().map(|a| a.size).sum();
        let latest = artifacts
            .iter()
            .map(|a| a.created)
            .max()
            .unwrap_or(SystemTime::UNIX_EPOCH);
        Self {
            key: key.into(),
            artifacts,
            total_size,
            latest,
        }
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// True when the session holds no artifacts
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// True when the episode was split into more than one file
    pub fn is_multi_part(&self) -> bool {
        self.artifacts.len() > 1
    }

    /// Total size in megabytes, for display
    pub fn total_size_mb(&self) -> f64 {
        bytes_to_mb(self.total_size)
    }

    /// Most recent creation time in local time, for display
    pub fn latest_local(&self) -> DateTime<Local> {
        DateTime::<Local>::from(self.latest)
    }

    /// Paths of the members in play order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.artifacts.iter().map(|a| a.path.clone()).collect()
    }
}

fn sort_by_part(artifacts: &mut [AudioArtifact]) {
    artifacts.sort_by(|a, b| {
        a.part
            .cmp(&b.part)
            .then_with(|| a.file_name().cmp(&b.file_name()))
    });
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
