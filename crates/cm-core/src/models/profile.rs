//! Profile row backing an identity - the role column plus marketplace fields.

use crate::Role;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the `profiles` table, keyed by the identity id it backs.
///
/// A backend trigger materializes this row some time after identity
/// creation. Every field except `role` is owned by other subsystems and
/// is never written from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub college_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write shape for the keyed upsert strategy, restricted to the columns
/// this subsystem is allowed to supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpsert {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl ProfileUpsert {
    pub fn new(id: Uuid, email: String, role: Role) -> Self {
        Self { id, email, role }
    }
}
