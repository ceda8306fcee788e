//! Identity provisioning and role reconciliation.
//!
//! Signup creates an identity whose profile row and role are filled in
//! by backend machinery that is allowed to lag or misfire. This crate
//! owns the client side of that contract: it records the declared role
//! durably, drives the profile row toward it with ordered idempotent
//! writes, and re-checks on every sign-in until the backend agrees.

pub mod backoff;
pub mod bootstrapper;
pub mod file_intent_store;
pub mod intent_store;
pub mod logger;
pub mod memory_intent_store;
pub mod reconciler;
pub mod registrar;

pub use backoff::RetryPolicy;
pub use bootstrapper::{BootstrapError, SessionBootstrapper, SessionSnapshot};
pub use file_intent_store::FileIntentStore;
pub use intent_store::{IntentStoreError, PendingIntentStore};
pub use logger::LoggerError;
pub use memory_intent_store::MemoryIntentStore;
pub use reconciler::ProfileReconciler;
pub use registrar::{IdentityRegistrar, RegistrationError};

#[cfg(test)]
mod tests;
