use crate::config::Config;
use crate::error::{BlogcastError, Result};
use colored::Colorize;
use std::path::Path;

/// Count the regular files in `dir` accepted by `keep`
///
/// Returns `None` when the directory does not exist yet.
fn count_files(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Option<usize>> {
    if !dir.exists() {
        return Ok(None);
    }
    let mut count = 0;
    let io_error = |e| BlogcastError::io(dir, e);
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && keep(&path) {
            count += 1;
        }
    }
    Ok(Some(count))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

fn key_line(name: &str, present: bool) {
    if present {
        println!("  {} {}", name, "configured".green());
    } else {
        println!("  {} {}", name, "missing".red());
    }
}

fn dir_line(label: &str, dir: &Path, count: Option<usize>, what: &str) {
    match count {
        Some(n) => println!("  {:<9} {} ({} {})", label, dir.display(), n, what),
        None => println!(
            "  {:<9} {} ({})",
            label,
            dir.display(),
            "will be created on first use".yellow()
        ),
    }
}

/// Show API key presence and output directory contents
///
/// Key values are never printed.
pub fn handle_status(config: &Config) -> Result<()> {
    println!("\n{}", "API keys:".bold());
    key_line("OPENAI_API_KEY   ", config.openai.api_key.is_some());
    key_line("FIRECRAWL_API_KEY", config.firecrawl.api_key.is_some());

    let ext = config.output.audio_extension.as_str();
    let audio_dir = config.output.audio_dir();
    let scripts_dir = config.output.scripts_dir();
    let metadata_dir = config.output.metadata_dir();

    println!("\n{}", "Output directories:".bold());
    dir_line(
        "audio",
        &audio_dir,
        count_files(&audio_dir, |p| has_extension(p, ext))?,
        &format!("{} file(s)", ext),
    );
    dir_line(
        "scripts",
        &scripts_dir,
        count_files(&scripts_dir, |p| has_extension(p, "txt"))?,
        "script(s)",
    );
    dir_line(
        "metadata",
        &metadata_dir,
        count_files(&metadata_dir, |_| true)?,
        "file(s)",
    );
    println!();

    println!(
        "Model: {}, speech: {}, default voice: {}",
        config.openai.model.cyan(),
        config.openai.tts_model.cyan(),
        config.synthesis.default_voice.as_str().cyan()
    );
    println!();

    Ok(())
}
