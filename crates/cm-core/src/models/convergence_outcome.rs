use crate::WriteStrategy;

/// Terminal state of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceOutcome {
    /// Stored role already matched the declared role; nothing was written
    AlreadyConverged,
    /// A strategy wrote the role and read-back confirmed it
    Converged { strategy: WriteStrategy },
    /// Profile row not materialized within the pass; retry later
    Deferred,
    /// No permitted strategy produced a confirmed write
    Diverged,
}

impl ConvergenceOutcome {
    /// True when the stored role is known to match the declared role.
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::AlreadyConverged | Self::Converged { .. })
    }
}

impl std::fmt::Display for ConvergenceOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyConverged => write!(f, "already_converged"),
            Self::Converged { strategy } => write!(f, "converged({strategy})"),
            Self::Deferred => write!(f, "deferred"),
            Self::Diverged => write!(f, "diverged"),
        }
    }
}
