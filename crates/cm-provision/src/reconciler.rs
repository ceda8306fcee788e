use crate::backoff::RetryPolicy;
use crate::intent_store::PendingIntentStore;

use std::sync::Arc;

use cm_core::{
    ConvergenceOutcome, PendingRoleIntent, Profile, ProfileStore, ProfileStoreError,
    ProfileUpsert, Role, WriteStrategy,
};
use log::{debug, info, warn};
use tokio::time::sleep;
use uuid::Uuid;

enum StrategyResult {
    /// Write accepted and the read-back shows the declared role.
    Confirmed,
    /// Backend refused the write outright.
    Denied,
    /// Write accepted but the read-back still shows the old role.
    Unconfirmed,
    /// Store error that ends the pass.
    Failed,
}

/// Drives a profile row toward its declared role, one pass at a time.
///
/// A pass is strictly sequential: fetch the row (waiting out trigger
/// latency), short-circuit if the role already matches, then try each
/// write strategy in order with a read-back after every accepted write.
/// Only a read-back showing the declared role counts as success; a
/// write the backend accepted but silently dropped falls through to
/// the next strategy.
///
/// There is no cross-pass lock. Every write is idempotent and clearing
/// the intent happens only after confirmation, so overlapping or
/// repeated passes degrade to no-ops.
pub struct ProfileReconciler {
    profiles: Arc<dyn ProfileStore>,
    intents: Arc<dyn PendingIntentStore>,
    retry: RetryPolicy,
}

impl ProfileReconciler {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        intents: Arc<dyn PendingIntentStore>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            profiles,
            intents,
            retry,
        }
    }

    /// Run one pass for a stored intent.
    pub async fn reconcile_intent(&self, intent: &PendingRoleIntent) -> ConvergenceOutcome {
        self.reconcile(intent.identity_id, &intent.email, intent.declared_role)
            .await
    }

    /// Run one reconciliation pass.
    ///
    /// Never fails; every failure mode maps to an outcome. `Deferred`
    /// and `Diverged` leave the stored intent in place so a later pass
    /// can finish the job.
    pub async fn reconcile(
        &self,
        identity_id: Uuid,
        email: &str,
        declared_role: Role,
    ) -> ConvergenceOutcome {
        let profile = match self.await_materialization(identity_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                info!("Profile {identity_id} not materialized yet, deferring");
                return ConvergenceOutcome::Deferred;
            }
            Err(e) => {
                warn!("Profile fetch for {identity_id} failed: {e}");
                return ConvergenceOutcome::Diverged;
            }
        };

        if profile.role == declared_role {
            debug!("Profile {identity_id} already has role {declared_role}");
            self.clear_intent(identity_id);
            return ConvergenceOutcome::AlreadyConverged;
        }

        for strategy in WriteStrategy::ORDERED {
            match self
                .attempt(identity_id, email, declared_role, strategy)
                .await
            {
                StrategyResult::Confirmed => {
                    info!("Role {declared_role} for {identity_id} confirmed via {strategy}");
                    self.clear_intent(identity_id);
                    return ConvergenceOutcome::Converged { strategy };
                }
                StrategyResult::Denied | StrategyResult::Unconfirmed => continue,
                StrategyResult::Failed => return ConvergenceOutcome::Diverged,
            }
        }

        warn!("All write strategies exhausted for {identity_id}, role still {}", profile.role);
        ConvergenceOutcome::Diverged
    }

    /// One strategy: write, then believe only the read-back.
    async fn attempt(
        &self,
        identity_id: Uuid,
        email: &str,
        declared_role: Role,
        strategy: WriteStrategy,
    ) -> StrategyResult {
        let write = match strategy {
            WriteStrategy::DirectUpdate => {
                self.profiles.update_role(identity_id, declared_role).await
            }
            WriteStrategy::Upsert => {
                let row = ProfileUpsert::new(identity_id, email.to_string(), declared_role);
                self.profiles.upsert(&row).await
            }
            WriteStrategy::ElevatedAssign => {
                self.profiles
                    .assign_role_elevated(identity_id, declared_role)
                    .await
            }
        };

        if let Err(e) = write {
            if e.is_permission_denied() {
                debug!("{strategy} denied for {identity_id}, trying next strategy");
                return StrategyResult::Denied;
            }
            warn!("{strategy} for {identity_id} failed: {e}");
            return StrategyResult::Failed;
        }

        match self.profiles.fetch(identity_id).await {
            Ok(Some(profile)) if profile.role == declared_role => StrategyResult::Confirmed,
            Ok(_) => {
                debug!("{strategy} for {identity_id} was accepted but did not take effect");
                StrategyResult::Unconfirmed
            }
            Err(e) => {
                warn!("Read-back after {strategy} for {identity_id} failed: {e}");
                StrategyResult::Failed
            }
        }
    }

    /// Fetch the profile row, waiting out the signup trigger if needed.
    async fn await_materialization(
        &self,
        identity_id: Uuid,
    ) -> Result<Option<Profile>, ProfileStoreError> {
        let mut profile = self.profiles.fetch(identity_id).await?;
        if profile.is_some() {
            return Ok(profile);
        }

        for delay in self.retry.delays() {
            debug!("Profile {identity_id} absent, retrying fetch in {delay:?}");
            sleep(delay).await;

            profile = self.profiles.fetch(identity_id).await?;
            if profile.is_some() {
                break;
            }
        }

        Ok(profile)
    }

    fn clear_intent(&self, identity_id: Uuid) {
        // A leftover entry is harmless: the next pass lands on
        // AlreadyConverged and repeats the clear.
        if let Err(e) = self.intents.clear(identity_id) {
            warn!("Failed to clear intent for {identity_id}: {e}");
        }
    }
}
