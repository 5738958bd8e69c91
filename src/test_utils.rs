//! Test utilities for Blogcast
//!
//! This module provides common test utilities including temporary directory
//! management, fixture file creation, and assertion helpers.

use crate::config::Config;
use crate::error::BlogcastError;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Create a fake audio file of exactly `size` bytes
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_audio_file(dir: &TempDir, name: &str, size: usize) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, vec![0xFFu8; size]).expect("Failed to write audio fixture");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T, BlogcastError>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Create a configuration whose output tree lives under `root`
pub fn test_config(root: &TempDir) -> Config {
    let mut config = Config::default();
    config.output.root = root.path().to_path_buf();
    config.openai.api_key = Some("sk-test".to_string());
    config.firecrawl.api_key = Some("fc-test".to_string());
    config
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
openai:
  model: gpt-4o-mini
  tts_model: tts-1-hd
  max_tokens: 1500
  temperature: 0.5

firecrawl:
  timeout_seconds: 45

output:
  root: /tmp/blogcast-test
  audio_extension: mp3

synthesis:
  default_voice: nova
  max_chars_per_part: 2000
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "content");
    }

    #[test]
    fn test_create_audio_file_size() {
        let dir = temp_dir();
        let path = create_audio_file(&dir, "a.mp3", 64);
        assert_eq!(std::fs::metadata(path).unwrap().len(), 64);
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<(), BlogcastError> =
            Err(BlogcastError::Config("test error message".to_string()));
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<(), BlogcastError> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    fn test_test_config_validates() {
        let dir = temp_dir();
        let config = test_config(&dir);
        assert!(config.validate().is_ok());
        assert_eq!(config.output.audio_dir(), dir.path().join("audio"));
    }

    #[test]
    fn test_test_config_yaml() {
        let yaml = test_config_yaml();
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.openai.model, "gpt-4o-mini");
    }
}
