use std::panic::Location;
use std::path::PathBuf;

use cm_core::PendingRoleIntent;
use error_location::ErrorLocation;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum IntentStoreError {
    #[error("No local data directory available: {message} {location}")]
    DataDir {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to create intent directory {path}: {source} {location}")]
    DirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to read intent file {path}: {source} {location}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to write intent file {path}: {source} {location}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to serialize intents: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Failed to replace {path} atomically: {source} {location}")]
    AtomicRename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to back up corrupted intent file {path}: {source} {location}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl IntentStoreError {
    /// Whether retrying the same operation could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            IntentStoreError::FileRead { .. }
                | IntentStoreError::FileWrite { .. }
                | IntentStoreError::AtomicRename { .. }
        )
    }

    #[track_caller]
    pub fn data_dir(message: impl Into<String>) -> Self {
        IntentStoreError::DataDir {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn dir_creation(path: PathBuf, source: std::io::Error) -> Self {
        IntentStoreError::DirCreation {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn file_read(path: PathBuf, source: std::io::Error) -> Self {
        IntentStoreError::FileRead {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn file_write(path: PathBuf, source: std::io::Error) -> Self {
        IntentStoreError::FileWrite {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn serialization(source: serde_json::Error) -> Self {
        IntentStoreError::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn atomic_rename(path: PathBuf, source: std::io::Error) -> Self {
        IntentStoreError::AtomicRename {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn backup_failed(path: PathBuf, source: std::io::Error) -> Self {
        IntentStoreError::BackupFailed {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntentStoreError>;

/// Durable record of role intents that have not been confirmed on the
/// backend yet.
///
/// At most one intent per identity id. Entries outlive the session that
/// wrote them; a later sign-in for the same identity picks the entry
/// back up. Implementations must be safe to share across tasks.
pub trait PendingIntentStore: Send + Sync {
    /// Pending intent for the identity, if any.
    fn get(&self, identity_id: Uuid) -> Result<Option<PendingRoleIntent>>;

    /// Record an intent, replacing any previous one for the same identity.
    fn set(&self, intent: &PendingRoleIntent) -> Result<()>;

    /// Remove the intent for the identity. Removing a missing entry is
    /// not an error.
    fn clear(&self, identity_id: Uuid) -> Result<()>;
}
