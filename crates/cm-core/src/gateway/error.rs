use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors from the external auth subsystem.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Email address already registered {location}")]
    EmailTaken { location: ErrorLocation },

    #[error("Credentials rejected: {message} {location}")]
    CredentialsRejected {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session token rejected {location}")]
    Unauthorized { location: ErrorLocation },

    #[error("Auth service unavailable (status {status}) {location}")]
    ServiceUnavailable { status: u16, location: ErrorLocation },

    #[error("Malformed auth response: {message} {location}")]
    InvalidResponse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport failure reaching auth service: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },
}

impl IdentityError {
    /// Whether a later retry of the same call could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServiceUnavailable { .. } | Self::Transport { .. })
    }

    /// Creates EmailTaken error at caller location.
    #[track_caller]
    pub fn email_taken() -> Self {
        Self::EmailTaken {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates CredentialsRejected error at caller location.
    #[track_caller]
    pub fn credentials_rejected(message: impl Into<String>) -> Self {
        Self::CredentialsRejected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Unauthorized error at caller location.
    #[track_caller]
    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates ServiceUnavailable error at caller location.
    #[track_caller]
    pub fn service_unavailable(status: u16) -> Self {
        Self::ServiceUnavailable {
            status,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates InvalidResponse error at caller location.
    #[track_caller]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Transport error at caller location.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Errors from the profile row store.
///
/// `PermissionDenied` is the one variant reconciliation treats as
/// expected: it means a row-level rule refused the write and the next
/// strategy should run. Everything else ends the pass.
#[derive(Error, Debug)]
pub enum ProfileStoreError {
    #[error("Permission denied for {operation} {location}")]
    PermissionDenied {
        operation: String,
        location: ErrorLocation,
    },

    #[error("Profile store unavailable (status {status}) {location}")]
    Unavailable { status: u16, location: ErrorLocation },

    #[error("Malformed profile store response: {message} {location}")]
    InvalidResponse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport failure reaching profile store: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },
}

impl ProfileStoreError {
    /// True when a row-level rule refused the operation.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Whether a later retry of the same call could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Transport { .. })
    }

    /// Creates PermissionDenied error at caller location.
    #[track_caller]
    pub fn permission_denied(operation: impl Into<String>) -> Self {
        Self::PermissionDenied {
            operation: operation.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Unavailable error at caller location.
    #[track_caller]
    pub fn unavailable(status: u16) -> Self {
        Self::Unavailable {
            status,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates InvalidResponse error at caller location.
    #[track_caller]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Transport error at caller location.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
