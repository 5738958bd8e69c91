//! Blog-to-podcast conversion pipeline
//!
//! A conversion runs four stages in order: scrape the article, write the
//! script, synthesize audio, and record run metadata. Output lands in the
//! directories named by [`OutputConfig`], which are created on demand.

pub mod chunking;

use crate::config::{Config, OutputConfig, SynthesisConfig};
use crate::error::{BlogcastError, Result};
use crate::prompts::format_script;
use crate::services::{
    FirecrawlScraper, OpenAiScriptWriter, OpenAiSpeech, Scraper, ScriptWriter, SpeechSynthesizer,
};
use crate::voice::Voice;

use chrono::Local;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};

/// File the latest script is saved to, inside the scripts directory
pub const SCRIPT_FILE_NAME: &str = "podcast_script.txt";

/// File the latest run summary is saved to, inside the metadata directory
pub const INFO_FILE_NAME: &str = "podcast_audio_info.txt";

/// Pipeline stage, reported to progress callbacks and named in errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fetching the article
    Scraping,
    /// Generating the podcast script
    WritingScript,
    /// Synthesizing audio part `part` of `total`
    Synthesizing {
        /// 1-based part being synthesized
        part: usize,
        /// Number of parts
        total: usize,
    },
    /// Writing the run summary
    WritingMetadata,
    /// Conversion finished
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Scraping => write!(f, "scraping"),
            Stage::WritingScript => write!(f, "script generation"),
            Stage::Synthesizing { part, total } => {
                write!(f, "speech synthesis (part {}/{})", part, total)
            }
            Stage::WritingMetadata => write!(f, "metadata"),
            Stage::Done => write!(f, "done"),
        }
    }
}

/// What to convert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Blog post URL
    pub url: String,
    /// Voice used for synthesis
    pub voice: Voice,
}

impl ConversionRequest {
    /// Create a request
    pub fn new(url: impl Into<String>, voice: Voice) -> Self {
        Self {
            url: url.into(),
            voice,
        }
    }
}

/// Result of a successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    /// Article title
    pub title: String,
    /// Source URL
    pub url: String,
    /// Voice used
    pub voice: Voice,
    /// Saved script (with metadata header and footer)
    pub script_path: PathBuf,
    /// Audio files in play order
    pub audio_files: Vec<PathBuf>,
    /// Run summary file
    pub info_path: PathBuf,
    /// Characters sent to the speech service
    pub char_count: usize,
    /// Total audio bytes written
    pub total_bytes: u64,
    /// Estimated synthesis cost in dollars
    pub estimated_cost: f64,
}

/// Progress callback invoked at each stage transition
pub type ProgressFn<'a> = &'a (dyn Fn(Stage) + Sync);

/// Conversion pipeline over a scraper, script writer, and synthesizer
pub struct Pipeline<S, W, T> {
    scraper: S,
    writer: W,
    synthesizer: T,
    output: OutputConfig,
    synthesis: SynthesisConfig,
}

impl Pipeline<FirecrawlScraper, OpenAiScriptWriter, OpenAiSpeech> {
    /// Build the production pipeline from configuration
    ///
    /// # Errors
    ///
    /// Returns error if an HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            FirecrawlScraper::new(config.firecrawl.clone())?,
            OpenAiScriptWriter::new(config.openai.clone())?,
            OpenAiSpeech::new(config.openai.clone())?,
            config,
        ))
    }
}

impl<S, W, T> Pipeline<S, W, T>
where
    S: Scraper,
    W: ScriptWriter,
    T: SpeechSynthesizer,
{
    /// Create a pipeline from its collaborators
    pub fn new(scraper: S, writer: W, synthesizer: T, config: &Config) -> Self {
        Self {
            scraper,
            writer,
            synthesizer,
            output: config.output.clone(),
            synthesis: config.synthesis.clone(),
        }
    }

    /// Convert one blog post into a podcast episode
    ///
    /// # Errors
    ///
    /// Returns `BlogcastError::Conversion` naming the failed stage and
    /// listing every file written before the failure
    pub async fn convert(
        &self,
        request: &ConversionRequest,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<ConversionOutcome> {
        let report = |stage: Stage| {
            tracing::info!("Stage: {}", stage);
            if let Some(cb) = progress {
                cb(stage);
            }
        };
        let mut written: Vec<PathBuf> = Vec::new();

        report(Stage::Scraping);
        let article = self
            .scraper
            .scrape(&request.url)
            .await
            .map_err(|e| conversion_error(Stage::Scraping, e, &written))?;

        report(Stage::WritingScript);
        let script = self
            .writer
            .write_script(&article.to_prompt_text())
            .await
            .map_err(|e| conversion_error(Stage::WritingScript, e, &written))?;
        let saved = format_script(&script, &self.writer.model_name());
        let script_path = self.output.scripts_dir().join(SCRIPT_FILE_NAME);
        write_text(&script_path, &saved)
            .await
            .map_err(|e| conversion_error(Stage::WritingScript, e, &written))?;
        written.push(script_path.clone());

        let cleaned = chunking::clean_script_for_tts(&saved);
        if cleaned.is_empty() {
            let e = BlogcastError::Synthesis(
                "No valid script content found for audio generation".to_string(),
            );
            return Err(conversion_error(
                Stage::Synthesizing { part: 1, total: 1 },
                e.into(),
                &written,
            ));
        }
        let parts = chunking::split_into_parts(&cleaned, self.synthesis.max_chars_per_part);
        let char_count: usize = parts.iter().map(|p| p.chars().count()).sum();

        let audio_dir = self.output.audio_dir();
        tokio::fs::create_dir_all(&audio_dir).await.map_err(|e| {
            conversion_error(
                Stage::Synthesizing { part: 1, total: parts.len() },
                BlogcastError::io(&audio_dir, e).into(),
                &written,
            )
        })?;

        let base = episode_base_name(&request.url, &cleaned, Local::now());
        let paths = audio_paths(&audio_dir, &base, &self.output.audio_extension, parts.len());
        let mut sizes = Vec::with_capacity(parts.len());
        let total = parts.len();

        for (i, (text, path)) in parts.iter().zip(&paths).enumerate() {
            let stage = Stage::Synthesizing { part: i + 1, total };
            report(stage);
            let bytes = self
                .synthesizer
                .synthesize(text, request.voice, path)
                .await
                .map_err(|e| conversion_error(stage, e, &written))?;
            written.push(path.clone());
            sizes.push(bytes);
        }

        report(Stage::WritingMetadata);
        let total_bytes: u64 = sizes.iter().sum();
        let estimated_cost = (char_count as f64 / 1000.0) * self.synthesis.cost_per_1k_chars;
        let outcome = ConversionOutcome {
            title: article.title,
            url: request.url.clone(),
            voice: request.voice,
            script_path,
            audio_files: paths,
            info_path: self.output.metadata_dir().join(INFO_FILE_NAME),
            char_count,
            total_bytes,
            estimated_cost,
        };
        let info = render_info(&outcome, &sizes);
        write_text(&outcome.info_path, &info)
            .await
            .map_err(|e| conversion_error(Stage::WritingMetadata, e, &written))?;

        report(Stage::Done);
        tracing::info!(
            "Converted '{}' into {} audio file(s)",
            outcome.title,
            outcome.audio_files.len()
        );
        Ok(outcome)
    }
}

fn conversion_error(stage: Stage, err: anyhow::Error, written: &[PathBuf]) -> anyhow::Error {
    tracing::error!("Conversion failed during {}: {}", stage, err);
    BlogcastError::Conversion {
        stage: stage.to_string(),
        source: err.into(),
        partial_artifacts: written.to_vec(),
    }
    .into()
}

async fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| BlogcastError::io(parent, e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| BlogcastError::io(path, e))?;
    Ok(())
}

/// `podcast_<YYYYMMDD_HHMMSS>_<8 hex chars>`
///
/// The hash covers the URL, the cleaned script, and the timestamp down to the
/// nanosecond, so two runs on the same URL within one second get distinct
/// names.
pub fn episode_base_name(url: &str, script: &str, now: chrono::DateTime<Local>) -> String {
    let stamp = now.format("%Y%m%d_%H%M%S").to_string();
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(script.as_bytes());
    hasher.update(now.format("%Y%m%d_%H%M%S%.9f").to_string().as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    format!("podcast_{}_{}", stamp, &hash[..8])
}

/// Audio file paths for an episode split into `count` parts
///
/// A single part is named `<base>.<ext>`; several are `<base>_part<N>.<ext>`.
pub fn audio_paths(dir: &Path, base: &str, ext: &str, count: usize) -> Vec<PathBuf> {
    if count == 1 {
        return vec![dir.join(format!("{}.{}", base, ext))];
    }
    (1..=count)
        .map(|n| dir.join(format!("{}.{}", crate::artifacts::naming::part_stem(base, n as u32), ext)))
        .collect()
}

fn render_info(outcome: &ConversionOutcome, sizes: &[u64]) -> String {
    let mut out = String::new();
    out.push_str("Audio generation completed successfully!\n\n");
    out.push_str("Details:\n");
    out.push_str(&format!("- Title: {}\n", outcome.title));
    out.push_str(&format!("- Source: {}\n", outcome.url));
    out.push_str("- Output files:\n");
    for (path, size) in outcome.audio_files.iter().zip(sizes) {
        out.push_str(&format!(
            "  - {} ({:.2} MB)\n",
            path.display(),
            *size as f64 / (1024.0 * 1024.0)
        ));
    }
    out.push_str(&format!("- Voice used: {}\n", outcome.voice));
    out.push_str(&format!(
        "- Total size: {:.2} MB\n",
        outcome.total_bytes as f64 / (1024.0 * 1024.0)
    ));
    out.push_str(&format!(
        "- Script length: {} characters\n",
        outcome.char_count
    ));
    out.push_str(&format!("- Estimated cost: ${:.4}\n", outcome.estimated_cost));
    out
}
