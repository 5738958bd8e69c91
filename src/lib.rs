//! Blogcast - blog post to podcast conversion library
//!
//! This library turns a blog post URL into a narrated podcast episode and
//! manages the audio files that conversions leave behind.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `artifacts`: Audio file naming conventions, session grouping, and export
//! - `pipeline`: The scrape, script, and speech conversion pipeline
//! - `services`: Traits and HTTP clients for Firecrawl and OpenAI
//! - `prompts`: Script-writing prompts and the saved script format
//! - `context`: State carried between interactive conversions
//! - `voice`: The speech voice catalogue
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use blogcast::artifacts::{resolve_latest_session, scan_audio_dir};
//! use blogcast::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let artifacts = scan_audio_dir(&config.output.audio_dir(), &config.output.audio_extension)?;
//!     if let Some(session) = resolve_latest_session(&artifacts) {
//!         println!("{}: {} part(s)", session.key, session.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod prompts;
pub mod services;
pub mod voice;

// Re-export commonly used types
pub use artifacts::{AudioArtifact, Session};
pub use config::Config;
pub use context::ConversionContext;
pub use error::{BlogcastError, Result};
pub use pipeline::{ConversionOutcome, ConversionRequest, Pipeline};
pub use voice::Voice;

#[cfg(test)]
pub mod test_utils;
