//! The session: circuit construction, assertions, assumptions and solving.
//!
//! A [`Session`] owns the variable space, the gate table, the clause encoder
//! and the SAT engine. All operations go through it.
//!
//! # Solve protocol
//!
//! Gates, assertions and assumptions can be added in any state, including
//! after a previous solve. Asserting (or assuming) a variable immediately
//! compiles the part of the circuit reachable from it. [`Session::solve`]
//! then:
//!
//! 1. submits a unit clause for every assertion not yet given to the engine,
//! 2. makes sure every active assumption is compiled,
//! 3. runs the engine under the assumptions and the configured bounds,
//! 4. on SAT, rebuilds the solution, inferring values for variables that
//!    never reached the engine.

use std::collections::{HashSet, VecDeque};
use std::fmt::{Debug, Display, Formatter};

use log::{debug, info, warn};

use crate::cadical::CadicalSolver;
use crate::compile::add_reachable;
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::extend::{self, ref_value, Solution};
use crate::gate::{Gate, GateKey, Op};
use crate::reference::Ref;
use crate::solver::{SatSolver, SolveStatus, SolverError};
use crate::space::VarSpace;
use crate::table::GateTable;
use crate::tseitin::Encoder;
use crate::types::Lit;

/// Size counters of a session.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Stats {
    pub circuit_vars: usize,
    pub gates: usize,
    pub cnf_vars: usize,
    pub cnf_clauses: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} circuit vars, {} gates, {} cnf vars, {} cnf clauses",
            self.circuit_vars, self.gates, self.cnf_vars, self.cnf_clauses
        )
    }
}

pub struct Session<S: SatSolver = CadicalSolver> {
    space: VarSpace,
    table: GateTable,
    encoder: Encoder,
    solver: S,
    config: SessionConfig,

    /// Asserted literals, in insertion order.
    asserts: Vec<Lit>,
    asserted: HashSet<Lit>,
    /// Number of leading `asserts` already given to the engine as unit clauses.
    emitted: usize,

    assumptions: Vec<Lit>,

    solution: Solution,
    status: SolveStatus,
    unknown_cause: Option<SolverError>,
}

impl Session<CadicalSolver> {
    /// Create a session backed by CaDiCaL.
    pub fn new(threads: usize, elimination: bool) -> Self {
        Self::with_config(SessionConfig::new(threads, elimination))
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let solver = CadicalSolver::new(config.elimination);
        let config = SessionConfig {
            elimination: solver.elimination(),
            ..config
        };
        Self::with_solver(solver, config)
    }
}

impl Default for Session<CadicalSolver> {
    fn default() -> Self {
        Self::with_config(SessionConfig::default())
    }
}

impl<S: SatSolver> Session<S> {
    /// Create a session on top of an arbitrary engine.
    ///
    /// `config.elimination` is a construction-time engine option and is not
    /// applied here.
    pub fn with_solver(mut solver: S, config: SessionConfig) -> Self {
        solver.set_thread_count(config.threads);
        solver.set_max_time(config.max_time);
        solver.set_max_conflicts(config.max_conflicts);

        Self {
            space: VarSpace::new(),
            table: GateTable::new(),
            encoder: Encoder::new(),
            solver,
            config,
            asserts: Vec::new(),
            asserted: HashSet::new(),
            emitted: 0,
            assumptions: Vec::new(),
            solution: Solution::new(),
            status: SolveStatus::Unknown,
            unknown_cause: None,
        }
    }
}

impl<S: SatSolver> Debug for Session<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("stats", &self.stats())
            .field("asserts", &self.asserts.len())
            .field("assumptions", &self.assumptions.len())
            .field("status", &self.status)
            .finish()
    }
}

// Configuration and introspection
impl<S: SatSolver> Session<S> {
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Set the wall-clock bound (in seconds) for every subsequent solve.
    pub fn configure_timeout(&mut self, seconds: f64) {
        self.config.max_time = Some(seconds);
        self.solver.set_max_time(Some(seconds));
    }

    /// Set the conflict bound for every subsequent solve.
    pub fn configure_conflict_limit(&mut self, count: u64) {
        self.config.max_conflicts = Some(count);
        self.solver.set_max_conflicts(Some(count));
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    #[cfg(test)]
    pub(crate) fn solver_mut(&mut self) -> &mut S {
        &mut self.solver
    }

    /// Status of the last solve (`Unknown` before the first one).
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Why the last solve returned `Unknown`, if it ran and did.
    pub fn unknown_cause(&self) -> Option<&SolverError> {
        self.unknown_cause.as_ref()
    }

    pub fn num_circuit_vars(&self) -> usize {
        self.space.num_circuit()
    }
    pub fn num_gates(&self) -> usize {
        self.table.len()
    }
    pub fn num_cnf_vars(&self) -> usize {
        self.space.num_cnf()
    }
    pub fn num_cnf_clauses(&self) -> usize {
        self.encoder.num_clauses()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            circuit_vars: self.num_circuit_vars(),
            gates: self.num_gates(),
            cnf_vars: self.num_cnf_vars(),
            cnf_clauses: self.num_cnf_clauses(),
        }
    }

    /// The gate defining the variable of `r`, if it is a gate output.
    pub fn gate_of(&self, r: Ref) -> Option<&Gate> {
        self.table.defining(r.id()).map(|g| &self.table[g])
    }

    /// The CNF literal currently mapped to `r`, if it was ever given to the engine.
    pub fn cnf_literal(&self, r: impl Into<Ref>) -> Result<Option<i32>> {
        let r = self.check(r.into())?;
        Ok(self.space.lookup(r).map(Lit::to_dimacs))
    }

    pub(crate) fn check(&self, r: Ref) -> Result<Ref> {
        if r.is_zero() {
            return Err(Error::ZeroVariable);
        }
        if !self.space.contains(r) {
            return Err(Error::UnknownVariable(r.get()));
        }
        Ok(r)
    }
}

// Circuit construction
impl<S: SatSolver> Session<S> {
    /// Allocate a fresh input variable.
    pub fn var(&mut self) -> Ref {
        self.space.next_circuit()
    }

    /// Build (or reuse) the gate `op(left, right)` and return its output.
    pub fn gate(&mut self, op: Op, left: impl Into<Ref>, right: impl Into<Ref>) -> Result<Ref> {
        let left = self.check(left.into())?;
        let right = self.check(right.into())?;
        let key = GateKey::new(left, op, right);

        if let Some(g) = self.table.find(&key) {
            let output = self.table[g].output();
            debug!("gate({}, {}, {}) -> {} (existing)", op, left, right, output);
            return Ok(output);
        }

        let output = self.space.next_circuit();
        let g = self.table.insert(key, output);
        debug!("gate({}, {}, {}) -> {}", op, left, right, output);

        // Keep a previous solution consistent with gates built after it.
        if !self.solution.is_empty() {
            if let Some(value) = extend::evaluate(&self.table[g], &self.solution) {
                self.solution.insert(output.id(), value);
            }
        }
        Ok(output)
    }

    pub fn and(&mut self, left: impl Into<Ref>, right: impl Into<Ref>) -> Result<Ref> {
        self.gate(Op::And, left, right)
    }
    pub fn nand(&mut self, left: impl Into<Ref>, right: impl Into<Ref>) -> Result<Ref> {
        self.gate(Op::Nand, left, right)
    }
    pub fn or(&mut self, left: impl Into<Ref>, right: impl Into<Ref>) -> Result<Ref> {
        self.gate(Op::Or, left, right)
    }
    pub fn nor(&mut self, left: impl Into<Ref>, right: impl Into<Ref>) -> Result<Ref> {
        self.gate(Op::Nor, left, right)
    }
    pub fn xor(&mut self, left: impl Into<Ref>, right: impl Into<Ref>) -> Result<Ref> {
        self.gate(Op::Xor, left, right)
    }
}

// Facts
impl<S: SatSolver> Session<S> {
    fn reach(&mut self, from: Ref) -> usize {
        add_reachable(
            from,
            &mut self.space,
            &mut self.table,
            &mut self.encoder,
            &mut self.solver,
        )
    }

    /// Permanently assert that `r` is true.
    pub fn assert(&mut self, r: impl Into<Ref>) -> Result<()> {
        let r = self.check(r.into())?;
        let lit = self.space.cnf_of(r);
        if self.asserted.insert(lit) {
            debug!("assert({}) as {}", r, lit);
            self.asserts.push(lit);
        }
        self.reach(r);
        Ok(())
    }

    /// Assert every reference in `refs`; nothing is asserted if any is invalid.
    pub fn assert_many<I>(&mut self, refs: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Ref>,
    {
        let refs = refs
            .into_iter()
            .map(|r| self.check(r.into()))
            .collect::<Result<Vec<_>>>()?;
        for r in refs {
            self.assert(r)?;
        }
        Ok(())
    }

    /// Assume that `r` is true for subsequent solves, until [`unassume`][Session::unassume]d.
    pub fn assume(&mut self, r: impl Into<Ref>) -> Result<()> {
        let r = self.check(r.into())?;
        let lit = self.space.cnf_of(r);
        if !self.assumptions.contains(&lit) {
            debug!("assume({}) as {}", r, lit);
            self.assumptions.push(lit);
        }
        self.reach(r);
        Ok(())
    }

    /// Drop every assumption (of either polarity) on the variable of `r`.
    pub fn unassume(&mut self, r: impl Into<Ref>) -> Result<()> {
        let r = self.check(r.into())?;
        if let Some(lit) = self.space.lookup(r) {
            self.assumptions.retain(|a| a.var() != lit.var());
        }
        Ok(())
    }

    /// Currently active assumptions, as circuit references.
    pub fn assumptions(&self) -> Vec<Ref> {
        self.assumptions
            .iter()
            .filter_map(|lit| {
                let r = self.space.circuit_of(lit.var())?;
                Some(if lit.is_negative() { -r } else { r })
            })
            .collect()
    }
}

// Solving
impl<S: SatSolver> Session<S> {
    pub fn solve(&mut self) -> SolveStatus {
        for &lit in &self.asserts[self.emitted..] {
            self.encoder.clause(&mut self.solver, &[lit]);
        }
        self.emitted = self.asserts.len();

        for lit in self.assumptions.clone() {
            let origin = self
                .space
                .circuit_of(lit.var())
                .unwrap_or_else(|| panic!("Assumption {} has no circuit variable", lit));
            self.reach(origin);
        }

        let assumptions: Vec<i32> = self.assumptions.iter().map(|lit| lit.to_dimacs()).collect();
        let result = self.solver.solve(&assumptions);

        self.status = match result {
            Ok(true) => {
                let model = self.solver.model();
                self.solution = extend::extend_solution(&model, &self.space, &self.table);
                self.unknown_cause = None;
                SolveStatus::Satisfiable
            }
            Ok(false) => {
                self.unknown_cause = None;
                SolveStatus::Unsatisfiable
            }
            Err(e) => {
                warn!("solve: no verdict: {}", e);
                self.unknown_cause = Some(e);
                SolveStatus::Unknown
            }
        };

        info!("solve: {} ({})", self.status, self.stats());
        self.status
    }

    /// Value of `r` in the last solution.
    ///
    /// Requires the last [`solve`][Session::solve] to have returned SAT.
    pub fn value(&self, r: impl Into<Ref>) -> Result<bool> {
        let r = self.check(r.into())?;
        if self.status != SolveStatus::Satisfiable {
            return Err(Error::NotSatisfiable(self.status));
        }
        ref_value(&self.solution, r).ok_or(Error::Unassigned(r.get()))
    }

    /// Build a variable that is true iff at least one of `refs` differs from
    /// its value in the last solution.
    ///
    /// Asserting the result excludes the current assignment of `refs` from
    /// subsequent solves.
    pub fn block_solution<I>(&mut self, refs: I) -> Result<Ref>
    where
        I: IntoIterator,
        I::Item: Into<Ref>,
    {
        let mut differs = VecDeque::new();
        for r in refs {
            let r = r.into();
            let value = self.value(r)?;
            differs.push_back(if value { -r } else { r });
        }

        let mut result = differs.pop_front().ok_or(Error::NoVariables)?;
        for r in differs {
            result = self.or(result, r)?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::solver::testing::Recorder;

    fn recording() -> Session<Recorder> {
        Session::with_solver(Recorder::default(), SessionConfig::default())
    }

    #[test]
    fn test_dedup_returns_existing_output() {
        let mut s = recording();
        let a = s.var();
        let b = s.var();
        let x = s.and(a, b).unwrap();
        assert_eq!(s.and(b, a).unwrap(), x);
        assert_ne!(s.and(a, -b).unwrap(), x);
        assert_ne!(s.or(a, b).unwrap(), x);
        assert_eq!(s.num_gates(), 3);
        assert_eq!(s.num_circuit_vars(), 5);
    }

    #[test]
    fn test_malformed_input_leaves_state_untouched() {
        let mut s = recording();
        let a = s.var();
        assert_eq!(s.and(a, 0), Err(Error::ZeroVariable));
        assert_eq!(s.xor(a, 7), Err(Error::UnknownVariable(7)));
        assert_eq!(s.assert(-9), Err(Error::UnknownVariable(-9)));
        assert_eq!(s.assert_many([a.get(), 0]), Err(Error::ZeroVariable));
        assert_eq!(s.stats(), Stats { circuit_vars: 1, ..Stats::default() });
        assert!(s.asserts.is_empty());
    }

    #[test]
    fn test_assert_compiles_eagerly() {
        let mut s = recording();
        let a = s.var();
        let b = s.var();
        let x = s.nor(a, b).unwrap();
        assert_eq!(s.num_cnf_clauses(), 0);
        s.assert(-x).unwrap();
        assert_eq!(s.num_cnf_vars(), 3);
        assert_eq!(s.num_cnf_clauses(), 3);
        assert_eq!(s.cnf_literal(-x).unwrap(), Some(-1));
    }

    #[test]
    fn test_unit_clauses_emitted_once() {
        let mut s = recording();
        let a = s.var();
        s.assert(a).unwrap();
        s.assert(a).unwrap();
        s.solver.answer = vec![false, true];
        assert_eq!(s.solve(), SolveStatus::Satisfiable);
        assert_eq!(s.solver.clauses, vec![vec![1]]);
        s.solve();
        assert_eq!(s.solver.clauses, vec![vec![1]]);
        assert_eq!(s.num_cnf_clauses(), 1);
    }

    #[test]
    fn test_assumptions_forwarded() {
        let mut s = recording();
        let a = s.var();
        let b = s.var();
        s.assume(a).unwrap();
        s.assume(-b).unwrap();
        s.assume(a).unwrap();
        assert_eq!(s.assumptions(), vec![a, -b]);

        s.solver.answer = vec![false, true, false];
        assert_eq!(s.solve(), SolveStatus::Satisfiable);
        assert_eq!(s.solver.assumptions, vec![1, -2]);

        s.unassume(-b).unwrap();
        assert_eq!(s.assumptions(), vec![a]);
        s.solve();
        assert_eq!(s.solver.assumptions, vec![1]);
    }

    #[test]
    fn test_value_before_solve() {
        let mut s = recording();
        let a = s.var();
        assert_eq!(s.value(a), Err(Error::NotSatisfiable(SolveStatus::Unknown)));
        assert_eq!(s.value(0), Err(Error::ZeroVariable));
    }

    #[test]
    fn test_gate_after_solve_is_evaluated() {
        let mut s = recording();
        let a = s.var();
        let b = s.var();
        s.assert(a).unwrap();
        s.assert(-b).unwrap();
        s.solver.answer = vec![false, true, false];
        assert!(s.solve().is_sat());

        let x = s.xor(a, b).unwrap();
        let y = s.and(x, -b).unwrap();
        assert_eq!(s.value(x), Ok(true));
        assert_eq!(s.value(y), Ok(true));
        assert_eq!(s.num_cnf_vars(), 2);
    }

    #[test]
    fn test_unassigned_variable() {
        let mut s = recording();
        let a = s.var();
        let b = s.var();
        s.assert(a).unwrap();
        s.solver.answer = vec![false, true];
        assert!(s.solve().is_sat());
        assert_eq!(s.value(b), Err(Error::Unassigned(b.get())));
    }

    #[test]
    fn test_unsat_keeps_value_locked() {
        let mut s = recording();
        let a = s.var();
        s.assert(a).unwrap();
        s.solver.answer = vec![false, false];
        assert_eq!(s.solve(), SolveStatus::Unsatisfiable);
        assert_eq!(
            s.value(a),
            Err(Error::NotSatisfiable(SolveStatus::Unsatisfiable))
        );
        assert_eq!(s.unknown_cause(), None);
    }
}
