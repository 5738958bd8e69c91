use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Write fake audio files oldest first
///
/// Sleeps between writes so creation timestamps are strictly increasing.
#[allow(dead_code)]
pub fn write_audio_in_order(dir: &Path, files: &[(&str, usize)]) -> Vec<PathBuf> {
    fs::create_dir_all(dir).expect("failed to create audio dir");
    files
        .iter()
        .map(|(name, size)| {
            std::thread::sleep(Duration::from_millis(50));
            let path = dir.join(name);
            fs::write(&path, vec![0u8; *size]).expect("failed to write audio file");
            path
        })
        .collect()
}
