pub mod convergence_outcome;
pub mod identity;
pub mod pending_role_intent;
pub mod profile;
pub mod role;
pub mod write_strategy;
