use serde::{Deserialize, Serialize};

/// One way of pushing a declared role into the profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStrategy {
    /// Plain column update through the caller's own row permissions
    DirectUpdate,
    /// Keyed upsert, merging on id conflict
    Upsert,
    /// Elevated assignment routine over the secret-key channel
    ElevatedAssign,
}

impl WriteStrategy {
    /// Attempt order for a reconciliation pass, weakest credential first.
    pub const ORDERED: [WriteStrategy; 3] = [
        WriteStrategy::DirectUpdate,
        WriteStrategy::Upsert,
        WriteStrategy::ElevatedAssign,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectUpdate => "direct_update",
            Self::Upsert => "upsert",
            Self::ElevatedAssign => "elevated_assign",
        }
    }
}

impl std::fmt::Display for WriteStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
