use crate::{ConfigError, ConfigErrorResult, DEFAULT_APP_DIR, DEFAULT_INTENT_FILENAME};

use std::path::PathBuf;

use serde::Deserialize;

/// Location of the durable pending-intent file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntentStoreConfig {
    /// Directory override. Defaults to the platform local-data directory.
    pub dir: Option<String>,
    /// Bare file name; path separators are rejected
    pub filename: String,
}

impl Default for IntentStoreConfig {
    fn default() -> Self {
        Self {
            dir: None,
            filename: String::from(DEFAULT_INTENT_FILENAME),
        }
    }
}

impl IntentStoreConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.filename.is_empty() {
            return Err(ConfigError::intent_store(
                "intent_store.filename must not be empty",
            ));
        }

        if self.filename.contains('/') || self.filename.contains('\\') || self.filename.contains("..")
        {
            return Err(ConfigError::intent_store(format!(
                "intent_store.filename must be a bare file name, got {}",
                self.filename
            )));
        }

        Ok(())
    }

    /// Full path of the intent file.
    pub fn resolve_path(&self) -> ConfigErrorResult<PathBuf> {
        let dir = match &self.dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join(DEFAULT_APP_DIR),
        };

        Ok(dir.join(&self.filename))
    }
}
