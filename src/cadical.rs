//! [`SatSolver`] implementation on top of the CaDiCaL engine.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::solver::{SatSolver, SolverError};

/// Terminate callback enforcing an optional wall-clock bound.
#[derive(Debug, Default)]
pub struct Deadline {
    limit: Option<Duration>,
    started: Option<Instant>,
    fired: bool,
}

impl Deadline {
    fn arm(&mut self, limit: Option<Duration>) {
        self.limit = limit;
        self.started = Some(Instant::now());
        self.fired = false;
    }
}

impl cadical::Callbacks for Deadline {
    fn terminate(&mut self) -> bool {
        if let (Some(limit), Some(started)) = (self.limit, self.started) {
            if started.elapsed() >= limit {
                self.fired = true;
            }
        }
        self.fired
    }
}

pub struct CadicalSolver {
    solver: cadical::Solver<Deadline>,
    /// Whether the engine actually runs with elimination enabled.
    elimination: bool,
    declared: usize,
    max_time: Option<f64>,
    max_conflicts: Option<u64>,
    threads: usize,
}

impl CadicalSolver {
    /// Create a new engine.
    ///
    /// With `elimination` disabled, the engine runs in its `plain`
    /// configuration (no preprocessing or inprocessing).
    pub fn new(elimination: bool) -> Self {
        let (mut solver, elimination): (cadical::Solver<Deadline>, bool) = if elimination {
            (cadical::Solver::new(), true)
        } else {
            match cadical::Solver::with_config("plain") {
                Ok(solver) => (solver, false),
                Err(e) => {
                    warn!(
                        "cadical: could not select 'plain' configuration, elimination stays on: {:?}",
                        e
                    );
                    (cadical::Solver::new(), true)
                }
            }
        };
        solver.set_callbacks(Some(Deadline::default()));

        Self {
            solver,
            elimination,
            declared: 0,
            max_time: None,
            max_conflicts: None,
            threads: 1,
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Whether variable elimination is in effect.
    ///
    /// This can differ from the requested mode if the `plain`
    /// configuration was unavailable.
    pub fn elimination(&self) -> bool {
        self.elimination
    }

    /// Apply per-call bounds; CaDiCaL resets its limits after every solve.
    fn prepare(&mut self) {
        if let Some(count) = self.max_conflicts {
            let limit = count.min(i32::MAX as u64) as i32;
            if let Err(e) = self.solver.set_limit("conflicts", limit) {
                warn!("cadical: could not set conflict limit {}: {:?}", limit, e);
            }
        }
        // A bound too large for `Duration` is no bound at all.
        let limit = self.max_time.and_then(|s| Duration::try_from_secs_f64(s).ok());
        if let Some(deadline) = self.solver.get_callbacks() {
            deadline.arm(limit);
        }
    }

    fn deadline_fired(&mut self) -> bool {
        self.solver.get_callbacks().map_or(false, |d| d.fired)
    }
}

impl Default for CadicalSolver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SatSolver for CadicalSolver {
    fn num_vars(&self) -> usize {
        self.declared
    }

    fn new_vars(&mut self, n: usize) {
        // CaDiCaL declares variables implicitly on first use.
        self.declared += n;
    }

    fn add_clause(&mut self, lits: &[i32]) {
        for &lit in lits {
            assert!(
                lit != 0 && lit.unsigned_abs() as usize <= self.declared,
                "Malformed clause {:?}: literal {} is not declared",
                lits,
                lit
            );
        }
        self.solver.add_clause(lits.iter().copied());
    }

    fn solve(&mut self, assumptions: &[i32]) -> Result<bool, SolverError> {
        self.prepare();
        debug!(
            "cadical: solving {} vars, {} clauses, {} assumptions ({} thread(s))",
            self.declared,
            self.solver.num_clauses(),
            assumptions.len(),
            self.threads()
        );
        let result = self.solver.solve_with(assumptions.iter().copied());
        match result {
            Some(result) => Ok(result),
            None if self.deadline_fired() => Err(SolverError::TimeLimit),
            None if self.max_conflicts.is_some() => Err(SolverError::ConflictLimit),
            None => Err(SolverError::Engine(
                "solver stopped without a verdict".to_string(),
            )),
        }
    }

    fn model(&self) -> Vec<bool> {
        let max = self.solver.max_variable().max(0) as usize;
        let mut model = vec![false; self.declared + 1];
        for (var, value) in model.iter_mut().enumerate().skip(1) {
            if var <= max {
                *value = self.solver.value(var as i32).unwrap_or(false);
            }
        }
        model
    }

    fn set_max_time(&mut self, seconds: Option<f64>) {
        self.max_time = seconds.filter(|s| s.is_finite() && *s >= 0.0);
    }

    fn set_max_conflicts(&mut self, count: Option<u64>) {
        self.max_conflicts = count;
    }

    fn set_thread_count(&mut self, n: usize) {
        if n > 1 {
            debug!("cadical: engine is single-threaded, ignoring request for {} threads", n);
        }
        self.threads = n.max(1);
    }
}
