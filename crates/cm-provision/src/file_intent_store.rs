use crate::intent_store::{IntentStoreError, PendingIntentStore, Result as IntentResult};

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cm_config::IntentStoreConfig;
use cm_core::PendingRoleIntent;
use log::{debug, info, warn};
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// JSON-file-backed intent store.
///
/// The whole store is one JSON object keyed by identity id, rewritten
/// atomically on every mutation (temp file, fsync, rename). A corrupted
/// file is moved aside at load time and the store starts empty; the
/// original bytes stay on disk for inspection.
///
/// Writes go through an in-process mutex, so one store instance per
/// path is assumed.
pub struct FileIntentStore {
    path: PathBuf,
    entries: Mutex<HashMap<Uuid, PendingRoleIntent>>,
}

impl FileIntentStore {
    /// Open the store at `path`, loading any existing entries.
    pub fn new(path: PathBuf) -> IntentResult<Self> {
        let entries = load_entries(&path)?;
        debug!("Opened intent store at {path:?} ({} entries)", entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Open the store at the configured location.
    pub fn from_config(config: &IntentStoreConfig) -> IntentResult<Self> {
        let path = config
            .resolve_path()
            .map_err(|e| IntentStoreError::data_dir(e.to_string()))?;

        Self::new(path)
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, PendingRoleIntent>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist the current entries atomically.
    fn save(&self, entries: &HashMap<Uuid, PendingRoleIntent>) -> IntentResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| IntentStoreError::dir_creation(parent.to_path_buf(), e))?;
        }

        let contents = serde_json::to_string_pretty(entries).map_err(IntentStoreError::serialization)?;

        let temp_path = self.path.with_extension(format!("json.tmp.{}", std::process::id()));

        {
            let mut file = File::create(&temp_path)
                .map_err(|e| IntentStoreError::file_write(temp_path.clone(), e))?;
            file.write_all(contents.as_bytes())
                .map_err(|e| IntentStoreError::file_write(temp_path.clone(), e))?;
            file.sync_all()
                .map_err(|e| IntentStoreError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            IntentStoreError::atomic_rename(self.path.clone(), e)
        })?;

        Ok(())
    }
}

impl PendingIntentStore for FileIntentStore {
    fn get(&self, identity_id: Uuid) -> IntentResult<Option<PendingRoleIntent>> {
        Ok(self.lock().get(&identity_id).cloned())
    }

    fn set(&self, intent: &PendingRoleIntent) -> IntentResult<()> {
        let mut entries = self.lock();
        entries.insert(intent.identity_id, intent.clone());
        self.save(&entries)?;
        info!(
            "Recorded pending role {} for {}",
            intent.declared_role, intent.identity_id
        );

        Ok(())
    }

    fn clear(&self, identity_id: Uuid) -> IntentResult<()> {
        let mut entries = self.lock();
        if entries.remove(&identity_id).is_none() {
            return Ok(());
        }
        self.save(&entries)?;
        info!("Cleared pending role intent for {identity_id}");

        Ok(())
    }
}

fn load_entries(path: &Path) -> IntentResult<HashMap<Uuid, PendingRoleIntent>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let contents =
        fs::read_to_string(path).map_err(|e| IntentStoreError::file_read(path.to_path_buf(), e))?;

    match serde_json::from_str(&contents) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            warn!("Intent file at {path:?} is corrupted: {e}");
            backup_corrupted(path)?;

            Ok(HashMap::new())
        }
    }
}

/// Move an unreadable intent file aside so the next save starts clean.
fn backup_corrupted(path: &Path) -> IntentResult<()> {
    let timestamp = chrono::Local::now().format(DATE_FORMAT);
    let backup_path = path.with_extension(format!("json.corrupted.{timestamp}"));

    fs::rename(path, &backup_path)
        .map_err(|e| IntentStoreError::backup_failed(path.to_path_buf(), e))?;
    warn!("Backed up corrupted intent file to {backup_path:?}");

    Ok(())
}
