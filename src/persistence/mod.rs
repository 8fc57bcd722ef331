//! Save/load helpers for small JSON files
//!
//! Features:
//! - Per-user data directory (overridable for tests and portable installs)
//! - Atomic writes (tmp → rename) so a crash never leaves half a file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "LEAP_OF_FAITH_DATA_DIR";

/// File name of the high score table
pub const HIGH_SCORES_FILE: &str = "high_score.json";
/// File name of the settings
pub const SETTINGS_FILE: &str = "settings.json";
/// File name of the log
pub const LOG_FILE: &str = "leap-of-faith.log";

/// Resolve (and create) the directory holding scores, settings and logs
pub fn data_dir() -> io::Result<PathBuf> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("", "", "leap-of-faith")
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "Could not determine data directory",
                )
            })?
            .data_dir()
            .to_path_buf(),
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Read and parse a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> io::Result<T> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Serialize to JSON and atomically replace `path`
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_path(name: &str) -> PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("leap-of-faith-test-{}", std::process::id()))
        .join(format!("{n}-{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        values: Vec<u32>,
    }

    #[test]
    fn test_write_then_read() {
        let path = test_path("sample.json");
        let sample = Sample {
            name: "x".to_string(),
            values: vec![1, 2, 3],
        };
        write_json(&path, &sample).unwrap();
        let back: Sample = read_json(&path).unwrap();
        assert_eq!(back, sample);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let path = test_path("missing.json");
        let err = read_json::<Sample>(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_garbage_is_invalid_data() {
        let path = test_path("garbage.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        let err = read_json::<Sample>(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
