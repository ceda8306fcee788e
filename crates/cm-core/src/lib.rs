pub mod error;
pub mod gateway;
pub mod models;

pub use error::{CoreError, Result};
pub use gateway::error::{IdentityError, ProfileStoreError};
pub use gateway::identity_provider::IdentityProvider;
pub use gateway::profile_store::ProfileStore;
pub use models::convergence_outcome::ConvergenceOutcome;
pub use models::identity::Identity;
pub use models::pending_role_intent::{INTENT_SCHEMA_VERSION, PendingRoleIntent};
pub use models::profile::{Profile, ProfileUpsert};
pub use models::role::Role;
pub use models::write_strategy::WriteStrategy;

#[cfg(test)]
mod tests;
