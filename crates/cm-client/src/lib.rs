//! HTTP adapters over the managed backend.
//!
//! `AuthApi` speaks the auth API (`/auth/v1`), `ProfileApi` the data API
//! (`/rest/v1`). Both translate wire failures into the gateway error
//! taxonomies; nothing above this crate sees a status code.

mod auth_api;
mod profile_api;

pub use auth_api::AuthApi;
pub use profile_api::ProfileApi;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
