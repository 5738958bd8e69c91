use super::{load_artifacts, print_session};
use crate::artifacts::{resolve_latest_session, Session};
use crate::config::Config;
use crate::error::{BlogcastError, Result};
use crate::pipeline::{ConversionOutcome, ConversionRequest, Pipeline, Stage};
use crate::voice::Voice;
use colored::Colorize;

/// Convert one URL and print the resulting episode
///
/// Returns the outcome together with the session resolved from the audio
/// directory afterwards, so callers can keep it as context.
pub async fn run_conversion(
    url: &str,
    voice: Voice,
    config: &Config,
) -> Result<(ConversionOutcome, Option<Session>)> {
    let pipeline = Pipeline::from_config(config)?;
    let request = ConversionRequest::new(url, voice);

    println!("Converting {} with voice {}", url.cyan(), voice.as_str().cyan());
    let progress = |stage: Stage| match stage {
        Stage::Scraping => println!("  Scraping the article..."),
        Stage::WritingScript => println!("  Writing the podcast script..."),
        Stage::Synthesizing { part, total } if total > 1 => {
            println!("  Generating audio part {} of {}...", part, total)
        }
        Stage::Synthesizing { .. } => println!("  Generating audio..."),
        Stage::WritingMetadata | Stage::Done => {}
    };

    let outcome = match pipeline.convert(&request, Some(&progress)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(BlogcastError::Conversion {
                partial_artifacts, ..
            }) = e.downcast_ref::<BlogcastError>()
            {
                for path in partial_artifacts {
                    eprintln!("{}", format!("Left behind: {}", path.display()).yellow());
                }
            }
            return Err(e);
        }
    };

    let session = resolve_latest_session(&load_artifacts(config)?);

    println!("{}", format!("Converted \"{}\"", outcome.title).green());
    match &session {
        Some(session) => print_session(session),
        None => tracing::warn!("No audio found in {}", config.output.audio_dir().display()),
    }
    println!("Script: {}", outcome.script_path.display());
    println!("Details: {}", outcome.info_path.display());
    println!(
        "Script length: {} characters, estimated cost ${:.4}",
        outcome.char_count, outcome.estimated_cost
    );
    println!();

    Ok((outcome, session))
}

/// Handle the `convert` command
pub async fn handle_convert(url: &str, voice: Option<Voice>, config: &Config) -> Result<()> {
    let voice = voice.unwrap_or(config.synthesis.default_voice);
    run_conversion(url, voice, config).await?;
    Ok(())
}
