use crate::intent_store::PendingIntentStore;
use crate::reconciler::ProfileReconciler;

use std::panic::Location;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{TimeZone, Utc};
use cm_auth::{AuthError, SessionClaims, TokenInspector};
use cm_core::{ConvergenceOutcome, Identity, IdentityProvider, PendingRoleIntent, Profile, ProfileStore, Role};
use error_location::ErrorLocation;
use log::{debug, info, warn};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Session token unusable: {source} {location}")]
    InvalidSessionToken {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },
}

impl BootstrapError {
    #[track_caller]
    pub fn invalid_session_token(source: AuthError) -> Self {
        BootstrapError::InvalidSessionToken {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// What the host application renders for the signed-in user.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub identity: Identity,
    /// Profile row, if it was reachable during bootstrap.
    pub profile: Option<Profile>,
    /// Declared role still waiting for confirmation, if any.
    pub pending_role: Option<Role>,
}

struct ActiveSession {
    epoch: u64,
    identity: Identity,
    profile: Option<Profile>,
}

/// Binds sign-in events to the reconciliation engine.
///
/// Each sign-in (and sign-out) advances an epoch. Repair passes capture
/// the epoch they started under and their results are applied to the
/// shared session state only while that epoch is still current, so a
/// pass that outlives its session cannot leak a stale profile into the
/// next one. The durable intent record is deliberately untouched by
/// sign-out; it belongs to the identity, not the session.
#[derive(Clone)]
pub struct SessionBootstrapper {
    identity_provider: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    intents: Arc<dyn PendingIntentStore>,
    reconciler: Arc<ProfileReconciler>,
    inspector: Arc<TokenInspector>,
    active: Arc<RwLock<Option<ActiveSession>>>,
    epoch: Arc<AtomicU64>,
}

impl SessionBootstrapper {
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        intents: Arc<dyn PendingIntentStore>,
        reconciler: Arc<ProfileReconciler>,
        inspector: TokenInspector,
    ) -> Self {
        Self {
            identity_provider,
            profiles,
            intents,
            reconciler,
            inspector: Arc::new(inspector),
            active: Arc::new(RwLock::new(None)),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Establish the session for a fresh access token.
    ///
    /// Fails only when the token itself is unusable. Backend hiccups
    /// degrade the snapshot instead: the identity falls back to what
    /// the claims carry and the profile is left out. When a pending
    /// intent exists a repair pass is spawned in the background.
    pub async fn on_session(&self, access_token: &str) -> Result<SessionSnapshot, BootstrapError> {
        let claims = self
            .inspector
            .inspect(access_token)
            .map_err(BootstrapError::invalid_session_token)?;
        let identity_id = claims
            .identity_id()
            .map_err(BootstrapError::invalid_session_token)?;

        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Bootstrapping session for {identity_id} (epoch {epoch})");

        let identity = match self.identity_provider.current_identity(access_token).await {
            Ok(identity) => identity,
            Err(e) => {
                debug!("Falling back to claims-derived identity for {identity_id}: {e}");
                claims_identity(identity_id, &claims)
            }
        };

        let profile = match self.profiles.fetch(identity_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Profile fetch during bootstrap of {identity_id} failed: {e}");
                None
            }
        };

        {
            let mut active = self.active.write().await;
            *active = Some(ActiveSession {
                epoch,
                identity: identity.clone(),
                profile: profile.clone(),
            });
        }

        let pending = self.pending_intent(identity_id);
        if let Some(intent) = pending.clone() {
            let bootstrapper = self.clone();
            tokio::spawn(async move {
                let outcome = bootstrapper.run_repair(&intent, epoch).await;
                info!("Session repair for {}: {outcome}", intent.identity_id);
            });
        }

        Ok(SessionSnapshot {
            identity,
            profile,
            pending_role: pending.map(|intent| intent.declared_role),
        })
    }

    /// Run one repair pass for the active session's pending intent.
    ///
    /// Returns `None` when there is no active session or nothing is
    /// pending for it.
    pub async fn repair_pass(&self) -> Option<ConvergenceOutcome> {
        let (identity_id, epoch) = {
            let active = self.active.read().await;
            let session = active.as_ref()?;
            (session.identity.id, session.epoch)
        };

        let intent = self.pending_intent(identity_id)?;

        Some(self.run_repair(&intent, epoch).await)
    }

    /// Reconcile and fold the result back into the epoch that asked
    /// for it. The epoch is captured by the caller so a pass keeps
    /// targeting the session it started under.
    async fn run_repair(&self, intent: &PendingRoleIntent, epoch: u64) -> ConvergenceOutcome {
        let outcome = self.reconciler.reconcile_intent(intent).await;

        if outcome.is_converged() {
            self.refresh_profile(intent.identity_id, epoch).await;
        }

        outcome
    }

    /// Drop the in-memory session.
    ///
    /// Pending intents survive; the next sign-in for the identity
    /// resumes where this session left off.
    pub async fn sign_out(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);

        let mut active = self.active.write().await;
        if let Some(session) = active.take() {
            info!("Signed out {}", session.identity.id);
        }
    }

    /// Snapshot of the current session, if any.
    pub async fn session(&self) -> Option<SessionSnapshot> {
        let active = self.active.read().await;
        let session = active.as_ref()?;
        let pending_role = self
            .pending_intent(session.identity.id)
            .map(|intent| intent.declared_role);

        Some(SessionSnapshot {
            identity: session.identity.clone(),
            profile: session.profile.clone(),
            pending_role,
        })
    }

    /// Re-fetch the profile and fold it into the session state, unless
    /// the session changed while the pass ran.
    async fn refresh_profile(&self, identity_id: Uuid, epoch: u64) {
        let profile = match self.profiles.fetch(identity_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return,
            Err(e) => {
                warn!("Profile refresh for {identity_id} failed: {e}");
                return;
            }
        };

        let mut active = self.active.write().await;
        match active.as_mut() {
            Some(session) if session.epoch == epoch && session.identity.id == identity_id => {
                session.profile = Some(profile);
            }
            _ => {
                debug!("Discarding profile refresh for {identity_id} from a stale pass");
            }
        }
    }

    fn pending_intent(&self, identity_id: Uuid) -> Option<PendingRoleIntent> {
        match self.intents.get(identity_id) {
            Ok(intent) => intent,
            Err(e) => {
                warn!("Intent lookup for {identity_id} failed: {e}");
                None
            }
        }
    }
}

/// Identity reconstructed from claims when the auth API is unreachable.
fn claims_identity(identity_id: Uuid, claims: &SessionClaims) -> Identity {
    Identity {
        id: identity_id,
        email: claims.email.clone().unwrap_or_default(),
        created_at: Utc
            .timestamp_opt(claims.iat, 0)
            .single()
            .unwrap_or_else(Utc::now),
    }
}
