//! Post-solve solution extension.
//!
//! The solver only knows about compiled variables. Gates that were never
//! reached (or were built after the solve) can still be determined: whenever
//! both operands of a gate have values, so does its output. Starting from the
//! solver's assignment, values are pushed forward through the dependents index
//! until nothing changes.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::gate::Gate;
use crate::reference::Ref;
use crate::space::VarSpace;
use crate::table::GateTable;

/// Values of circuit variables, keyed by unsigned id.
pub type Solution = HashMap<u32, bool>;

/// Value of a signed reference, if its variable has one.
pub fn ref_value(solution: &Solution, r: Ref) -> Option<bool> {
    solution.get(&r.id()).map(|&v| v != r.is_negated())
}

/// Evaluate `gate` if both of its operands have values.
pub fn evaluate(gate: &Gate, solution: &Solution) -> Option<bool> {
    let left = ref_value(solution, gate.left())?;
    let right = ref_value(solution, gate.right())?;
    Some(gate.eval(left, right))
}

/// Build the full solution from a solver `model` (indexed by CNF id).
pub fn extend_solution(model: &[bool], space: &VarSpace, table: &GateTable) -> Solution {
    assert!(
        model.len() > space.num_cnf(),
        "Model covers {} variables, but {} CNF variables are mapped",
        model.len().saturating_sub(1),
        space.num_cnf()
    );

    let mut solution = Solution::with_capacity(space.num_circuit());
    let mut frontier = VecDeque::new();

    for (var, r) in space.mapped() {
        solution.insert(r.id(), model[var.id() as usize]);
        if table.has_dependents(r.id()) {
            frontier.push_back(r.id());
        }
    }
    let seeded = solution.len();

    propagate(&mut solution, frontier, table);

    debug!(
        "extend_solution: {} seeded from model, {} inferred",
        seeded,
        solution.len() - seeded
    );
    solution
}

/// Push known values through dependent gates until a fixed point.
pub fn propagate(solution: &mut Solution, mut frontier: VecDeque<u32>, table: &GateTable) {
    while let Some(id) = frontier.pop_front() {
        for &g in table.dependents(id) {
            let gate = &table[g];
            let output = gate.output().id();
            if solution.contains_key(&output) {
                continue;
            }
            if ref_value(solution, gate.other(id)).is_none() {
                continue;
            }
            if let Some(value) = evaluate(gate, solution) {
                solution.insert(output, value);
                if table.has_dependents(output) {
                    frontier.push_back(output);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::gate::{GateKey, Op};

    fn setup() -> (VarSpace, GateTable) {
        (VarSpace::new(), GateTable::new())
    }

    fn gate(space: &mut VarSpace, table: &mut GateTable, a: Ref, op: Op, b: Ref) -> Ref {
        let output = space.next_circuit();
        table.insert(GateKey::new(a, op, b), output);
        output
    }

    #[test]
    fn test_seed_only() {
        let (mut space, table) = setup();
        let a = space.next_circuit();
        let b = space.next_circuit();
        space.cnf_of(b);
        space.cnf_of(a);

        // CNF 1 is `b`, CNF 2 is `a`.
        let solution = extend_solution(&[false, true, false], &space, &table);
        assert_eq!(ref_value(&solution, a), Some(false));
        assert_eq!(ref_value(&solution, b), Some(true));
        assert_eq!(ref_value(&solution, -b), Some(false));
    }

    #[test]
    fn test_uncompiled_gates_are_inferred() {
        let (mut space, mut table) = setup();
        let a = space.next_circuit();
        let b = space.next_circuit();
        let c = space.next_circuit();
        let x = gate(&mut space, &mut table, a, Op::Xor, -b);
        let y = gate(&mut space, &mut table, x, Op::Nor, c);
        let z = gate(&mut space, &mut table, y, Op::And, a);
        space.cnf_of(a);
        space.cnf_of(b);

        let solution = extend_solution(&[false, true, true], &space, &table);
        // x = a ^ !b = true ^ false
        assert_eq!(ref_value(&solution, x), Some(true));
        // y depends on c, which has no value
        assert_eq!(ref_value(&solution, y), None);
        assert_eq!(ref_value(&solution, z), None);
    }

    #[test]
    fn test_chain_is_propagated_to_fixed_point() {
        let (mut space, mut table) = setup();
        let a = space.next_circuit();
        let b = space.next_circuit();
        let x = gate(&mut space, &mut table, a, Op::And, b);
        let y = gate(&mut space, &mut table, x, Op::Or, -a);
        let z = gate(&mut space, &mut table, y, Op::Nand, x);
        space.cnf_of(a);
        space.cnf_of(b);

        let solution = extend_solution(&[false, true, false], &space, &table);
        assert_eq!(ref_value(&solution, x), Some(false));
        assert_eq!(ref_value(&solution, y), Some(false));
        assert_eq!(ref_value(&solution, z), Some(true));
    }

    #[test]
    fn test_model_values_are_not_overridden() {
        let (mut space, mut table) = setup();
        let a = space.next_circuit();
        let b = space.next_circuit();
        let x = gate(&mut space, &mut table, a, Op::And, b);
        space.cnf_of(x);
        space.cnf_of(a);
        space.cnf_of(b);

        let solution = extend_solution(&[false, true, true, true], &space, &table);
        assert_eq!(ref_value(&solution, x), Some(true));
    }

    #[test]
    fn test_evaluate_requires_both_operands() {
        let (mut space, mut table) = setup();
        let a = space.next_circuit();
        let b = space.next_circuit();
        let x = gate(&mut space, &mut table, a, Op::Or, b);
        let g = table.defining(x.id()).unwrap();

        let mut solution = Solution::new();
        solution.insert(a.id(), true);
        assert_eq!(evaluate(&table[g], &solution), None);
        solution.insert(b.id(), false);
        assert_eq!(evaluate(&table[g], &solution), Some(true));
    }

    #[test]
    #[should_panic(expected = "Model covers")]
    fn test_short_model_panics() {
        let (mut space, table) = setup();
        let a = space.next_circuit();
        space.cnf_of(a);
        extend_solution(&[false], &space, &table);
    }
}
