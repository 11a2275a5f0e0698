use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key-value adapter over the device-local storage directory.
///
/// One file per key, named exactly like the key. Collections are JSON arrays;
/// the profile keys hold plain strings. Every read re-parses the full blob and
/// every write replaces it unconditionally. Read failures degrade to "empty",
/// write failures are logged and swallowed; neither reaches callers.
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Open the storage scope at `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read the collection stored under `key`. A missing key or an unparsable
    /// value yields an empty collection.
    pub fn read<T>(&self, key: &str) -> Vec<T>
    where
        T: DeserializeOwned,
    {
        let path = self.key_path(key);
        if !path.exists() {
            debug!("Key {} not present, returning empty collection", key);
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read key {}: {}. Treating as empty.", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&content) {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to parse key {}: {}. Treating as empty.", key, e);
                Vec::new()
            }
        }
    }

    /// Serialize `items` and overwrite the full value under `key`. Best-effort:
    /// failures are logged, never returned.
    pub fn write<T>(&self, key: &str, items: &[T])
    where
        T: Serialize,
    {
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize key {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = std::fs::write(self.key_path(key), json) {
            warn!("Failed to write key {}: {}", key, e);
        } else {
            debug!("Wrote key {} ({} items)", key, items.len());
        }
    }

    /// Read a plain-string key. Missing or unreadable keys are `None`.
    pub fn read_text(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to read key {}: {}", key, e);
                None
            }
        }
    }

    /// Overwrite a plain-string key. Best-effort.
    pub fn write_text(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::write(self.key_path(key), value) {
            warn!("Failed to write key {}: {}", key, e);
        }
    }
}
