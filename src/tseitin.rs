//! Tseitin encoding of two-input gates.
//!
//! Every gate `v = op(a, b)` becomes the clause set of the biconditional
//! `v <-> op(a, b)` over the signed CNF literals `a`, `b`, `v`:
//!
//! ```text
//! AND:  (~a | ~b | v)  (a | ~v)  (b | ~v)
//! NAND: (~a | ~b | ~v) (a | v)   (b | v)
//! OR:   (a | b | ~v)   (~a | v)  (~b | v)
//! NOR:  (a | b | v)    (~a | ~v) (~b | ~v)
//! XOR:  (~a | ~b | ~v) (a | b | ~v) (a | ~b | v) (~a | b | v)
//! ```

use crate::gate::{CnfTriple, Op};
use crate::solver::SatSolver;
use crate::types::Lit;

/// Clause writer with a reusable scratch buffer and a clause counter.
#[derive(Debug, Default)]
pub struct Encoder {
    buffer: Vec<i32>,
    clauses: usize,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clauses submitted so far.
    pub fn num_clauses(&self) -> usize {
        self.clauses
    }

    /// Submit one clause to the solver.
    pub fn clause<S: SatSolver + ?Sized>(&mut self, solver: &mut S, lits: &[Lit]) {
        self.buffer.clear();
        self.buffer.extend(lits.iter().map(|lit| lit.to_dimacs()));
        solver.add_clause(&self.buffer);
        self.clauses += 1;
    }

    /// Submit the clause set encoding `v <-> op(a, b)`.
    pub fn encode<S: SatSolver + ?Sized>(&mut self, solver: &mut S, op: Op, [a, b, v]: CnfTriple) {
        match op {
            Op::And => {
                self.clause(solver, &[-a, -b, v]);
                self.clause(solver, &[a, -v]);
                self.clause(solver, &[b, -v]);
            }
            Op::Nand => {
                self.clause(solver, &[-a, -b, -v]);
                self.clause(solver, &[a, v]);
                self.clause(solver, &[b, v]);
            }
            Op::Or => {
                self.clause(solver, &[a, b, -v]);
                self.clause(solver, &[-a, v]);
                self.clause(solver, &[-b, v]);
            }
            Op::Nor => {
                self.clause(solver, &[a, b, v]);
                self.clause(solver, &[-a, -v]);
                self.clause(solver, &[-b, -v]);
            }
            Op::Xor => {
                self.clause(solver, &[-a, -b, -v]);
                self.clause(solver, &[a, b, -v]);
                self.clause(solver, &[a, -b, v]);
                self.clause(solver, &[-a, b, v]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::solver::testing::Recorder;

    fn triple() -> CnfTriple {
        [1, 2, 3].map(Lit::from_dimacs)
    }

    #[test]
    fn test_and_clauses() {
        let mut solver = Recorder::default();
        solver.vars = 3;
        let mut encoder = Encoder::new();
        encoder.encode(&mut solver, Op::And, triple());
        assert_eq!(solver.clauses, vec![vec![-1, -2, 3], vec![1, -3], vec![2, -3]]);
        assert_eq!(encoder.num_clauses(), 3);
    }

    #[test]
    fn test_xor_clauses() {
        let mut solver = Recorder::default();
        solver.vars = 3;
        let mut encoder = Encoder::new();
        encoder.encode(&mut solver, Op::Xor, triple());
        assert_eq!(solver.clauses.len(), 4);
        assert_eq!(encoder.num_clauses(), 4);
    }

    #[test]
    fn test_signed_operands() {
        let mut solver = Recorder::default();
        solver.vars = 3;
        let mut encoder = Encoder::new();
        let [a, b, v] = triple();
        encoder.encode(&mut solver, Op::Or, [-a, b, v]);
        assert_eq!(solver.clauses, vec![vec![-1, 2, -3], vec![1, 3], vec![-2, 3]]);
    }

    /// Each encoding must be satisfied by exactly the assignments matching the truth table.
    #[test]
    fn test_encodings_match_truth_tables() {
        for op in Op::ALL {
            let mut solver = Recorder::default();
            solver.vars = 3;
            let mut encoder = Encoder::new();
            encoder.encode(&mut solver, op, triple());

            for bits in 0..8u8 {
                let (a, b, v) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
                solver.answer = vec![false, a, b, v];
                let satisfied = solver.clauses.iter().all(|c| solver.satisfied(c));
                assert_eq!(satisfied, op.eval(a, b) == v, "{} with a={} b={} v={}", op, a, b, v);
            }
        }
    }
}
