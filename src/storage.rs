//! Persistent storage of the discovered meter frequency.
//!
//! The discovery scan takes several minutes; once a meter has answered, its
//! frequency is written out so later runs can skip the scan entirely.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the frequency store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing file exists but does not parse.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persistence seam for the discovered frequency.
pub trait FrequencyStore {
    /// The stored frequency in MHz, or `None` if nothing has been stored yet.
    fn load(&mut self) -> Result<Option<f32>, StoreError>;

    /// Persist `mhz` as the known meter frequency.
    fn store(&mut self, mhz: f32) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredFrequency {
    frequency_mhz: f32,
}

/// JSON-file-backed [`FrequencyStore`].
pub struct JsonFrequencyStore {
    path: PathBuf,
}

impl JsonFrequencyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFrequencyStore { path: path.into() }
    }
}

impl FrequencyStore for JsonFrequencyStore {
    fn load(&mut self) -> Result<Option<f32>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No stored frequency at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let stored: StoredFrequency = serde_json::from_str(&contents)?;
        Ok(Some(stored.frequency_mhz))
    }

    fn store(&mut self, mhz: f32) -> Result<(), StoreError> {
        let stored = StoredFrequency { frequency_mhz: mhz };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        debug!("Stored {mhz:.4} MHz to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFrequencyStore::new(dir.path().join("freq.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.json");
        let mut store = JsonFrequencyStore::new(&path);
        store.store(433.8205).unwrap();
        assert_eq!(store.load().unwrap(), Some(433.8205));

        // A fresh store over the same file sees the same value.
        let mut reopened = JsonFrequencyStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(433.8205));
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.json");
        fs::write(&path, "not json").unwrap();
        let mut store = JsonFrequencyStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Parse(_))));
    }
}
