use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Platform role stored in the profile row's `role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ordinary buyer account; what the backend trigger assigns by default
    #[default]
    Student,
    /// Runs a storefront on the marketplace
    Vendor,
    /// Full console access
    Admin,
    /// Reviews listings and announcements
    Moderator,
    /// Works the support ticket queue
    Support,
    /// Delivers orders
    Courier,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Student,
        Role::Vendor,
        Role::Admin,
        Role::Moderator,
        Role::Support,
        Role::Courier,
    ];

    /// Convert to wire/database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Vendor => "vendor",
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Support => "support",
            Self::Courier => "courier",
        }
    }

    /// Staff roles, as opposed to marketplace participants
    pub fn is_operational(&self) -> bool {
        matches!(self, Self::Admin | Self::Moderator | Self::Support)
    }
}

impl FromStr for Role {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "student" => Ok(Self::Student),
            "vendor" => Ok(Self::Vendor),
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            "support" => Ok(Self::Support),
            "courier" => Ok(Self::Courier),
            _ => Err(CoreError::InvalidRole {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
