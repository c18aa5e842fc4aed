//! Settings storage
//!
//! The parser reads three string settings (API key, base URL, model) from a
//! durable key-value store. The file-backed store keeps them in a JSON object
//! under the per-user config directory; the in-memory store backs tests and
//! embedders that manage settings themselves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tokio::fs;

use crate::constants::{defaults, settings_keys};

/// Read access to durable key-value settings
pub trait SettingsStore: Send + Sync {
    /// Value for `key`, if set
    fn get(&self, key: &str) -> Option<String>;
}

/// Settings held in memory
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }

    /// Snapshot of all entries
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.values.read().clone()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }
}

/// Settings persisted as a JSON object on disk
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    values: MemorySettingsStore,
}

impl FileSettingsStore {
    /// Default settings path (`<config_dir>/nl2ui/settings.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(defaults::SETTINGS_DIR)
                .join(defaults::SETTINGS_FILE)
        })
    }

    /// Load settings from disk; a missing file yields an empty store
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = MemorySettingsStore::new();

        if fs::try_exists(&path).await? {
            let contents = fs::read_to_string(&path).await?;
            let entries: BTreeMap<String, String> =
                serde_json::from_str(&contents).map_err(SettingsError::Parse)?;
            for (key, value) in entries {
                values.set(key, value);
            }
            log::debug!("Loaded settings from {:?}", path);
        }

        Ok(Self { path, values })
    }

    /// Save settings to disk
    pub async fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let contents =
            serde_json::to_string_pretty(&self.values.entries()).map_err(SettingsError::Serialize)?;
        fs::write(&self.path, contents).await?;

        log::info!("Settings saved to {:?}", self.path);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.set(key, value);
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn entries(&self) -> BTreeMap<String, String> {
        self.values.entries()
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key)
    }
}

/// The three model settings, with blank values treated as absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl ModelSettings {
    /// Read the model settings from a store
    pub fn read(store: &dyn SettingsStore) -> Self {
        let read = |key: &str| {
            store
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            api_key: read(settings_keys::API_KEY),
            base_url: read(settings_keys::BASE_URL),
            model: read(settings_keys::MODEL),
        }
    }
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(serde_json::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemorySettingsStore::new().with(settings_keys::MODEL, "gpt-4o");
        assert_eq!(store.get(settings_keys::MODEL).as_deref(), Some("gpt-4o"));
        assert_eq!(store.remove(settings_keys::MODEL).as_deref(), Some("gpt-4o"));
        assert!(store.get(settings_keys::MODEL).is_none());
    }

    #[test]
    fn test_model_settings_blank_is_absent() {
        let store = MemorySettingsStore::new()
            .with(settings_keys::API_KEY, "   ")
            .with(settings_keys::BASE_URL, " http://localhost:1234/v1 ");
        let settings = ModelSettings::read(&store);
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.base_url.as_deref(), Some("http://localhost:1234/v1"));
        assert_eq!(settings.model, None);
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::load(dir.path().join("settings.json"))
            .await
            .unwrap();
        assert!(store.entries().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let store = FileSettingsStore::load(&path).await.unwrap();
        store.set(settings_keys::API_KEY, "sk-test");
        store.set(settings_keys::MODEL, "qwen-plus");
        store.save().await.unwrap();

        let reloaded = FileSettingsStore::load(&path).await.unwrap();
        assert_eq!(reloaded.get(settings_keys::API_KEY).as_deref(), Some("sk-test"));
        assert_eq!(reloaded.get(settings_keys::MODEL).as_deref(), Some("qwen-plus"));
        assert_eq!(reloaded.path(), path.as_path());
    }

    #[tokio::test]
    async fn test_file_store_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FileSettingsStore::load(&path).await;
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }
}
