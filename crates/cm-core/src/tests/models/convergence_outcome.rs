use crate::{ConvergenceOutcome, WriteStrategy};

#[test]
fn test_convergence_outcome_is_converged() {
    assert!(ConvergenceOutcome::AlreadyConverged.is_converged());
    assert!(
        ConvergenceOutcome::Converged {
            strategy: WriteStrategy::Upsert
        }
        .is_converged()
    );
    assert!(!ConvergenceOutcome::Deferred.is_converged());
    assert!(!ConvergenceOutcome::Diverged.is_converged());
}

#[test]
fn test_convergence_outcome_display() {
    let converged = ConvergenceOutcome::Converged {
        strategy: WriteStrategy::DirectUpdate,
    };
    assert_eq!(converged.to_string(), "converged(direct_update)");
    assert_eq!(ConvergenceOutcome::Deferred.to_string(), "deferred");
}
