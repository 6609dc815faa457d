//! Last-round settings persistence
//!
//! The committed round is mirrored to a key/value [`Storage`] so the next
//! session can resume it. Persistence is best-effort: [`SettingsStore`] is
//! the boundary where every storage failure turns into "nothing stored".

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info, warn};

use crate::constants::storage::{FILE_EXTENSION, SETTINGS_KEY};

/// Finalized configuration of one round
///
/// Counts are signed so that implausible stored values still deserialize;
/// sanitizing them is the job of [`crate::setup::SetupState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundConfiguration {
    pub participant_count: i64,
    pub impostor_count: i64,
    pub topic_id: String,
}

/// Key/value storage port
pub trait Storage {
    /// Read the raw value under `key`, `Ok(None)` when nothing is stored
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Storage backed by one file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{FILE_EXTENSION}"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create settings directory {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// In-process storage, shared through `&self`
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().map_err(|_| anyhow!("memory storage lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().map_err(|_| anyhow!("memory storage lock poisoned"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// Best-effort mirror of the last committed round
#[derive(Debug)]
pub struct SettingsStore<S> {
    storage: S,
}

impl<S: Storage> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist `config` under the fixed settings key
    ///
    /// Failures are logged and dropped; losing the remembered round must
    /// never block starting a game.
    pub fn save(&self, config: &RoundConfiguration) {
        let result = serde_json::to_string(config)
            .context("Failed to serialize round settings")
            .and_then(|json| self.storage.set_item(SETTINGS_KEY, &json));

        match result {
            Ok(()) => info!(
                participants = config.participant_count,
                impostors = config.impostor_count,
                topic = %config.topic_id,
                "Saved round settings"
            ),
            Err(e) => warn!(error = ?e, "Failed to save round settings, ignoring"),
        }
    }

    /// Load the last committed round
    ///
    /// Missing, unreadable and malformed entries all come back as `None`.
    /// Field values are not validated.
    pub fn load(&self) -> Option<RoundConfiguration> {
        let stored = match self.storage.get_item(SETTINGS_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                debug!("No stored round settings");
                return None;
            }
            Err(e) => {
                warn!(error = ?e, "Failed to read round settings, ignoring");
                return None;
            }
        };

        match serde_json::from_str::<RoundConfiguration>(&stored) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(error = %e, "Stored round settings are malformed, ignoring");
                None
            }
        }
    }
}
