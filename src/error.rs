use thiserror::Error;

use crate::solver::SolveStatus;

/// Errors reported by [`Session`][crate::session::Session] operations.
///
/// Solver verdicts are not errors: UNSAT and UNKNOWN are ordinary
/// [`SolveStatus`] values.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    #[error("variable id 0 is not a valid reference")]
    ZeroVariable,

    #[error("variable {0} was never allocated")]
    UnknownVariable(i32),

    #[error("no solution available: last solve returned {0}")]
    NotSatisfiable(SolveStatus),

    #[error("variable {0} has no value in the current solution")]
    Unassigned(i32),

    #[error("expected at least one variable")]
    NoVariables,
}

pub type Result<T> = std::result::Result<T, Error>;
