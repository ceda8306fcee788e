use crate::gateway::error::ProfileStoreError;
use crate::{Profile, ProfileUpsert, Role};

use async_trait::async_trait;
use uuid::Uuid;

/// Row access to the `profiles` table behind its permission rules.
///
/// A write returning `Ok` proves nothing: row-level rules may discard the
/// change without an error. Callers only believe a write after reading
/// the row back.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile row. `Ok(None)` means the backend trigger has not
    /// materialized the row yet, which is not an error.
    async fn fetch(&self, id: Uuid) -> Result<Option<Profile>, ProfileStoreError>;

    /// Update the role column in place.
    async fn update_role(&self, id: Uuid, role: Role) -> Result<(), ProfileStoreError>;

    /// Keyed upsert, merging on id conflict. Never creates a second row
    /// for an existing id.
    async fn upsert(&self, row: &ProfileUpsert) -> Result<(), ProfileStoreError>;

    /// Trusted assignment routine over the elevated channel. Returns
    /// `PermissionDenied` when that channel is not configured.
    async fn assign_role_elevated(&self, id: Uuid, role: Role) -> Result<(), ProfileStoreError>;
}
