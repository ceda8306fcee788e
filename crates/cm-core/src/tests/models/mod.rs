mod convergence_outcome;
mod pending_role_intent;
mod profile;
mod role;
mod write_strategy;
