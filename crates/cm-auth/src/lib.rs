pub mod error;
pub mod session_claims;
pub mod token_inspector;

pub use error::{AuthError, Result};
pub use session_claims::{SessionClaims, UserMetadata};
pub use token_inspector::TokenInspector;

#[cfg(test)]
mod tests;
