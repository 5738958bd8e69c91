//! Configuration management for Blogcast
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{BlogcastError, Result};
use crate::voice::Voice;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Blogcast
///
/// Holds the settings for the two remote services, the output directory
/// layout, and speech synthesis behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// OpenAI settings (script generation and speech synthesis)
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Firecrawl settings (article scraping)
    #[serde(default)]
    pub firecrawl: FirecrawlConfig,
    /// Where generated files are written
    #[serde(default)]
    pub output: OutputConfig,
    /// Speech synthesis behaviour
    #[serde(default)]
    pub synthesis: SynthesisConfig,
}

/// OpenAI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key; usually supplied through `OPENAI_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// API base URL (useful for tests and compatible gateways)
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,

    /// Chat model used to write the script
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Speech model used for synthesis
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Maximum tokens in the generated script
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature for script generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout (seconds)
    #[serde(default = "default_openai_timeout")]
    pub timeout_seconds: u64,
}

fn default_openai_api_base() -> String {
    "https://api.openai.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_openai_timeout() -> u64 {
    120
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_openai_api_base(),
            model: default_openai_model(),
            tts_model: default_tts_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_seconds: default_openai_timeout(),
        }
    }
}

/// Firecrawl configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirecrawlConfig {
    /// API key; usually supplied through `FIRECRAWL_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_firecrawl_api_base")]
    pub api_base: String,

    /// Request timeout (seconds)
    #[serde(default = "default_firecrawl_timeout")]
    pub timeout_seconds: u64,
}

fn default_firecrawl_api_base() -> String {
    "https://api.firecrawl.dev".to_string()
}

fn default_firecrawl_timeout() -> u64 {
    60
}

impl Default for FirecrawlConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_firecrawl_api_base(),
            timeout_seconds: default_firecrawl_timeout(),
        }
    }
}

/// Output directory layout
///
/// Everything lives under `root`: audio in `audio/`, scripts in
/// `scripts/`, and run metadata in `metadata/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root of the output tree
    #[serde(default = "default_output_root")]
    pub root: PathBuf,

    /// Extension of generated audio files, without the dot
    #[serde(default = "default_audio_extension")]
    pub audio_extension: String,
}

fn default_output_root() -> PathBuf {
    PathBuf::from("output")
}

fn default_audio_extension() -> String {
    "mp3".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: default_output_root(),
            audio_extension: default_audio_extension(),
        }
    }
}

impl OutputConfig {
    /// Directory holding generated audio
    pub fn audio_dir(&self) -> PathBuf {
        self.root.join("audio")
    }

    /// Directory holding generated scripts
    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join("scripts")
    }

    /// Directory holding per-run metadata
    pub fn metadata_dir(&self) -> PathBuf {
        self.root.join("metadata")
    }
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Voice used when none is given on the command line
    #[serde(default)]
    pub default_voice: Voice,

    /// Longest script chunk sent in a single synthesis request
    #[serde(default = "default_max_chars_per_part")]
    pub max_chars_per_part: usize,

    /// Price per 1,000 input characters, used for the cost estimate
    #[serde(default = "default_cost_per_1k_chars")]
    pub cost_per_1k_chars: f64,
}

fn default_max_chars_per_part() -> usize {
    4000
}

fn default_cost_per_1k_chars() -> f64 {
    0.015
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            default_voice: Voice::default(),
            max_chars_per_part: default_max_chars_per_part(),
            cost_per_1k_chars: default_cost_per_1k_chars(),
        }
    }
}

/// The speech API rejects longer inputs
const MAX_SPEECH_INPUT_CHARS: usize = 4096;

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BlogcastError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| BlogcastError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.openai.api_key = Some(key);
            }
        }

        if let Ok(key) = std::env::var("FIRECRAWL_API_KEY") {
            if !key.is_empty() {
                self.firecrawl.api_key = Some(key);
            }
        }

        if let Ok(model) = std::env::var("MODEL") {
            if !model.is_empty() {
                self.openai.model = model;
            }
        }

        if let Ok(base) = std::env::var("BLOGCAST_OPENAI_API_BASE") {
            self.openai.api_base = base;
        }

        if let Ok(base) = std::env::var("BLOGCAST_FIRECRAWL_API_BASE") {
            self.firecrawl.api_base = base;
        }

        if let Ok(dir) = std::env::var("BLOGCAST_OUTPUT_DIR") {
            self.output.root = PathBuf::from(dir);
        }

        if let Ok(voice) = std::env::var("BLOGCAST_VOICE") {
            match voice.parse::<Voice>() {
                Ok(v) => self.synthesis.default_voice = v,
                Err(e) => tracing::warn!("Ignoring BLOGCAST_VOICE: {}", e),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(dir) = &cli.output_dir {
            tracing::debug!("Using output directory override: {}", dir.display());
            self.output.root = dir.clone();
        }
    }

    /// Validate the configuration
    ///
    /// Missing API keys are not a validation failure; the step that needs a
    /// key reports it when it runs.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.openai.model.trim().is_empty() {
            return Err(BlogcastError::Config("openai.model cannot be empty".to_string()).into());
        }

        if self.openai.tts_model.trim().is_empty() {
            return Err(
                BlogcastError::Config("openai.tts_model cannot be empty".to_string()).into(),
            );
        }

        if !(0.0..=2.0).contains(&self.openai.temperature) {
            return Err(BlogcastError::Config(
                "openai.temperature must be between 0.0 and 2.0".to_string(),
            )
            .into());
        }

        if self.openai.max_tokens == 0 {
            return Err(BlogcastError::Config(
                "openai.max_tokens must be greater than 0".to_string(),
            )
            .into());
        }

        if self.openai.timeout_seconds == 0 || self.firecrawl.timeout_seconds == 0 {
            return Err(
                BlogcastError::Config("timeout_seconds must be greater than 0".to_string()).into(),
            );
        }

        if self.synthesis.max_chars_per_part == 0
            || self.synthesis.max_chars_per_part > MAX_SPEECH_INPUT_CHARS
        {
            return Err(BlogcastError::Config(format!(
                "synthesis.max_chars_per_part must be between 1 and {}",
                MAX_SPEECH_INPUT_CHARS
            ))
            .into());
        }

        if self.synthesis.cost_per_1k_chars < 0.0 {
            return Err(BlogcastError::Config(
                "synthesis.cost_per_1k_chars cannot be negative".to_string(),
            )
            .into());
        }

        let ext = self.output.audio_extension.as_str();
        if ext.is_empty() || ext.contains('.') || ext.contains('/') {
            return Err(BlogcastError::Config(format!(
                "output.audio_extension must be a bare extension such as mp3, got '{}'",
                ext
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.openai.tts_model, "tts-1");
        assert_eq!(config.openai.max_tokens, 2000);
        assert_eq!(config.synthesis.default_voice, Voice::Alloy);
        assert_eq!(config.output.audio_dir(), PathBuf::from("output/audio"));
        assert_eq!(config.output.scripts_dir(), PathBuf::from("output/scripts"));
        assert_eq!(
            config.output.metadata_dir(),
            PathBuf::from("output/metadata")
        );
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_model() {
        let mut config = Config::default();
        config.openai.model = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_temperature_range() {
        let mut config = Config::default();
        config.openai.temperature = 2.5;
        assert!(config.validate().is_err());
        config.openai.temperature = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_part_length() {
        let mut config = Config::default();
        config.synthesis.max_chars_per_part = 0;
        assert!(config.validate().is_err());
        config.synthesis.max_chars_per_part = 5000;
        assert!(config.validate().is_err());
        config.synthesis.max_chars_per_part = 4096;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_extension() {
        let mut config = Config::default();
        config.output.audio_extension = ".mp3".to_string();
        assert!(config.validate().is_err());
        config.output.audio_extension = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
openai:
  api_base: http://localhost:9999
  model: gpt-4o-mini
  temperature: 0.3
firecrawl:
  api_base: http://localhost:9998
output:
  root: /srv/podcasts
synthesis:
  default_voice: onyx
  max_chars_per_part: 1000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.openai.api_base, "http://localhost:9999");
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.openai.tts_model, "tts-1");
        assert_eq!(config.firecrawl.api_base, "http://localhost:9998");
        assert_eq!(config.output.audio_dir(), PathBuf::from("/srv/podcasts/audio"));
        assert_eq!(config.synthesis.default_voice, Voice::Onyx);
        assert_eq!(config.synthesis.max_chars_per_part, 1000);
    }

    #[test]
    fn test_config_from_test_yaml() {
        let config: Config =
            serde_yaml::from_str(&crate::test_utils::test_config_yaml()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.openai.tts_model, "tts-1-hd");
        assert_eq!(config.synthesis.default_voice, Voice::Nova);
        assert_eq!(config.firecrawl.timeout_seconds, 45);
    }

    #[test]
    fn test_example_config_is_valid() {
        let yaml = include_str!("../config/config.example.yaml");
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.synthesis.max_chars_per_part, 4000);
    }

    #[test]
    fn test_api_keys_are_not_serialized() {
        let mut config = Config::default();
        config.openai.api_key = Some("sk-secret".to_string());
        config.firecrawl.api_key = Some("fc-secret".to_string());
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("secret"));
    }

    #[test]
    fn test_load_nonexistent_file_uses_defaults() {
        let cli = crate::cli::Cli::default();
        let config = Config::load("/definitely/not/here.yaml", &cli).unwrap();
        assert_eq!(config.openai.tts_model, "tts-1");
    }

    #[test]
    fn test_cli_output_dir_override() {
        let cli = crate::cli::Cli {
            output_dir: Some(PathBuf::from("/tmp/elsewhere")),
            ..Default::default()
        };
        let mut config = Config::default();
        config.apply_cli_overrides(&cli);
        assert_eq!(config.output.root, PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    #[serial]
    fn test_apply_env_vars_reads_keys_and_overrides() {
        std::env::set_var("OPENAI_API_KEY", "sk-env");
        std::env::set_var("FIRECRAWL_API_KEY", "fc-env");
        std::env::set_var("MODEL", "gpt-4.1");
        std::env::set_var("BLOGCAST_VOICE", "Shimmer");
        std::env::set_var("BLOGCAST_OUTPUT_DIR", "/tmp/bc-out");

        let mut config = Config::default();
        config.apply_env_vars();

        assert_eq!(config.openai.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.firecrawl.api_key.as_deref(), Some("fc-env"));
        assert_eq!(config.openai.model, "gpt-4.1");
        assert_eq!(config.synthesis.default_voice, Voice::Shimmer);
        assert_eq!(config.output.root, PathBuf::from("/tmp/bc-out"));

        for var in [
            "OPENAI_API_KEY",
            "FIRECRAWL_API_KEY",
            "MODEL",
            "BLOGCAST_VOICE",
            "BLOGCAST_OUTPUT_DIR",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_apply_env_vars_ignores_unknown_voice() {
        std::env::set_var("BLOGCAST_VOICE", "robot");
        let mut config = Config::default();
        config.synthesis.default_voice = Voice::Echo;
        config.apply_env_vars();
        assert_eq!(config.synthesis.default_voice, Voice::Echo);
        std::env::remove_var("BLOGCAST_VOICE");
    }
}
