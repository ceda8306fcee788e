pub mod error;
pub mod identity_provider;
pub mod profile_store;
