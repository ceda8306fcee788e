use crate::intent_store::PendingIntentStore;
use crate::reconciler::ProfileReconciler;

use std::panic::Location;
use std::sync::Arc;

use cm_core::{Identity, IdentityError, IdentityProvider, PendingRoleIntent, Role};
use error_location::ErrorLocation;
use log::{info, warn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid email address: {email} {location}")]
    InvalidEmail {
        email: String,
        location: ErrorLocation,
    },

    #[error("Password must be at least {minimum} characters {location}")]
    PasswordTooShort {
        minimum: usize,
        location: ErrorLocation,
    },

    #[error("Identity creation failed: {source} {location}")]
    Identity {
        #[source]
        source: IdentityError,
        location: ErrorLocation,
    },
}

impl RegistrationError {
    #[track_caller]
    pub fn invalid_email(email: impl Into<String>) -> Self {
        RegistrationError::InvalidEmail {
            email: email.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn password_too_short(minimum: usize) -> Self {
        RegistrationError::PasswordTooShort {
            minimum,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn identity(source: IdentityError) -> Self {
        RegistrationError::Identity {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Front door for signups.
///
/// Creating the identity is the only step that can fail a registration.
/// Once the identity exists the declared role is recorded durably and
/// converged in the background; role trouble never surfaces here.
pub struct IdentityRegistrar {
    identity: Arc<dyn IdentityProvider>,
    intents: Arc<dyn PendingIntentStore>,
    reconciler: Arc<ProfileReconciler>,
    min_password_length: usize,
}

impl IdentityRegistrar {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        intents: Arc<dyn PendingIntentStore>,
        reconciler: Arc<ProfileReconciler>,
        min_password_length: usize,
    ) -> Self {
        Self {
            identity,
            intents,
            reconciler,
            min_password_length,
        }
    }

    /// Register a new account with a declared role.
    ///
    /// Returns as soon as the identity exists on the backend. The first
    /// reconciliation pass runs on a spawned task; callers observe its
    /// progress through the profile row and the intent store.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        declared_role: Role,
    ) -> Result<Identity, RegistrationError> {
        validate_email(email)?;
        if password.chars().count() < self.min_password_length {
            return Err(RegistrationError::password_too_short(
                self.min_password_length,
            ));
        }

        let identity = self
            .identity
            .create_identity(email, password, declared_role)
            .await
            .map_err(RegistrationError::identity)?;
        info!("Created identity {} for {}", identity.id, identity.email);

        let intent = PendingRoleIntent::new(identity.id, identity.email.clone(), declared_role);
        if let Err(e) = self.intents.set(&intent) {
            // The signup already succeeded on the backend; without the
            // durable record only crash recovery is degraded.
            warn!("Failed to persist role intent for {}: {e}", identity.id);
        }

        let reconciler = Arc::clone(&self.reconciler);
        tokio::spawn(async move {
            let outcome = reconciler.reconcile_intent(&intent).await;
            info!(
                "Initial reconciliation for {}: {outcome}",
                intent.identity_id
            );
        });

        Ok(identity)
    }
}

/// Local well-formedness check. The backend stays authoritative for
/// deliverability and uniqueness.
fn validate_email(email: &str) -> Result<(), RegistrationError> {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if well_formed {
        Ok(())
    } else {
        Err(RegistrationError::invalid_email(email))
    }
}
