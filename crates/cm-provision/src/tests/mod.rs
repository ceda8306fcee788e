mod registrar;

use crate::backoff::RetryPolicy;

use std::time::Duration;

use chrono::Utc;
use cm_core::{PendingRoleIntent, Profile, Role};
use uuid::Uuid;

pub(crate) const TEST_EMAIL: &str = "amy@campus.edu";

pub(crate) fn profile(id: Uuid, role: Role) -> Profile {
    Profile {
        id,
        email: TEST_EMAIL.to_string(),
        role,
        display_name: None,
        college_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub(crate) fn intent_for(id: Uuid, role: Role) -> PendingRoleIntent {
    PendingRoleIntent::new(id, TEST_EMAIL.to_string(), role)
}

/// Deterministic policy with delays short enough for tests.
pub(crate) fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(20),
        backoff_multiplier: 2.0,
        jitter: false,
    }
}
