//! Contract with the external SAT engine.
//!
//! The session only ever talks to the engine through [`SatSolver`], using
//! DIMACS-style signed integers for literals. The default engine is
//! [`CadicalSolver`][crate::cadical::CadicalSolver].

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Outcome of a solve call.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SolveStatus {
    Satisfiable,
    Unsatisfiable,
    /// Not solved yet, or the engine stopped before reaching a verdict.
    Unknown,
}

impl SolveStatus {
    pub fn is_sat(self) -> bool {
        self == SolveStatus::Satisfiable
    }

    pub fn is_unsat(self) -> bool {
        self == SolveStatus::Unsatisfiable
    }

    pub fn is_unknown(self) -> bool {
        self == SolveStatus::Unknown
    }

    /// Tri-state view: `Some(true)` for SAT, `Some(false)` for UNSAT.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            SolveStatus::Satisfiable => Some(true),
            SolveStatus::Unsatisfiable => Some(false),
            SolveStatus::Unknown => None,
        }
    }
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SolveStatus::Satisfiable => "SAT",
            SolveStatus::Unsatisfiable => "UNSAT",
            SolveStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// Why the engine returned without a verdict.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum SolverError {
    #[error("wall-clock limit exceeded")]
    TimeLimit,
    #[error("conflict limit exceeded")]
    ConflictLimit,
    #[error("solver engine failure: {0}")]
    Engine(String),
}

/// An incremental SAT engine.
///
/// Variables are 1-indexed and literals are signed integers (positive for
/// true, negative for false). Clauses are permanent; assumptions only apply
/// to the next [`solve`][SatSolver::solve] call.
pub trait SatSolver {
    /// Number of variables currently declared.
    fn num_vars(&self) -> usize;

    /// Declare `n` more variables.
    fn new_vars(&mut self, n: usize);

    /// Add a clause. Every literal must refer to a declared variable.
    fn add_clause(&mut self, lits: &[i32]);

    /// Solve under `assumptions`.
    ///
    /// Returns `Ok(true)` if satisfiable, `Ok(false)` if unsatisfiable.
    fn solve(&mut self, assumptions: &[i32]) -> Result<bool, SolverError>;

    /// Truth value of every declared variable, index 0 unused.
    ///
    /// Only valid after `solve` returned `Ok(true)`.
    fn model(&self) -> Vec<bool>;

    fn set_max_time(&mut self, seconds: Option<f64>);
    fn set_max_conflicts(&mut self, count: Option<u64>);
    fn set_thread_count(&mut self, n: usize);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// In-memory engine that records everything it is given.
    ///
    /// Solving checks the recorded clauses against `answer`, a fixed
    /// assignment provided by the test.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub vars: usize,
        pub clauses: Vec<Vec<i32>>,
        pub assumptions: Vec<i32>,
        pub answer: Vec<bool>,
        pub solves: usize,
    }

    impl Recorder {
        pub fn satisfied(&self, clause: &[i32]) -> bool {
            clause
                .iter()
                .any(|&lit| self.answer.get(lit.unsigned_abs() as usize).copied().unwrap_or(false) == (lit > 0))
        }
    }

    impl SatSolver for Recorder {
        fn num_vars(&self) -> usize {
            self.vars
        }

        fn new_vars(&mut self, n: usize) {
            self.vars += n;
        }

        fn add_clause(&mut self, lits: &[i32]) {
            for &lit in lits {
                assert!(lit != 0 && lit.unsigned_abs() as usize <= self.vars, "Undeclared literal {}", lit);
            }
            self.clauses.push(lits.to_vec());
        }

        fn solve(&mut self, assumptions: &[i32]) -> Result<bool, SolverError> {
            self.solves += 1;
            self.assumptions = assumptions.to_vec();
            let ok = self.clauses.iter().all(|c| self.satisfied(c)) && assumptions.iter().all(|&a| self.satisfied(&[a]));
            Ok(ok)
        }

        fn model(&self) -> Vec<bool> {
            let mut model = self.answer.clone();
            model.resize(self.vars + 1, false);
            model
        }

        fn set_max_time(&mut self, _seconds: Option<f64>) {}
        fn set_max_conflicts(&mut self, _count: Option<u64>) {}
        fn set_thread_count(&mut self, _n: usize) {}
    }
}
