use crate::intent_store::{PendingIntentStore, Result as IntentResult};

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use cm_core::PendingRoleIntent;
use uuid::Uuid;

/// In-memory intent store. Nothing survives a restart; intended for
/// tests and ephemeral environments.
#[derive(Default)]
pub struct MemoryIntentStore {
    entries: Mutex<HashMap<Uuid, PendingRoleIntent>>,
}

impl MemoryIntentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PendingIntentStore for MemoryIntentStore {
    fn get(&self, identity_id: Uuid) -> IntentResult<Option<PendingRoleIntent>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(entries.get(&identity_id).cloned())
    }

    fn set(&self, intent: &PendingRoleIntent) -> IntentResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(intent.identity_id, intent.clone());

        Ok(())
    }

    fn clear(&self, identity_id: Uuid) -> IntentResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(&identity_id);

        Ok(())
    }
}
