//! Durable record of the role declared at signup.

use crate::Role;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current on-disk schema version for pending intents.
pub const INTENT_SCHEMA_VERSION: u32 = 1;

/// What the user asked to become, remembered until a profile write is
/// confirmed by read-back. Survives restarts and sign-outs; cleared only
/// on verified convergence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRoleIntent {
    pub identity_id: Uuid,
    pub declared_role: Role,
    /// Kept alongside the role so the upsert strategy can supply the
    /// required email column without a prior read.
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
}

fn default_schema_version() -> u32 {
    1
}

impl PendingRoleIntent {
    pub fn new(identity_id: Uuid, email: String, declared_role: Role) -> Self {
        Self {
            identity_id,
            declared_role,
            email,
            created_at: Utc::now(),
            schema_version: INTENT_SCHEMA_VERSION,
        }
    }
}
