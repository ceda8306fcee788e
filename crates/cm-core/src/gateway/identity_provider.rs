use crate::gateway::error::IdentityError;
use crate::{Identity, Role};

use async_trait::async_trait;

/// Access to the external auth subsystem that owns identities.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create exactly one identity for the given credentials.
    ///
    /// The declared role travels along as creation-time metadata. It is a
    /// hint for backend tooling, not an authoritative role assignment; the
    /// profile row still materializes with the default role.
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        declared_role: Role,
    ) -> Result<Identity, IdentityError>;

    /// Resolve the identity behind a session access token.
    async fn current_identity(&self, access_token: &str) -> Result<Identity, IdentityError>;
}
