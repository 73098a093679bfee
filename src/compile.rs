//! Reachability-driven lazy CNF emission.
//!
//! Gates are not encoded when they are built. Only when a variable is
//! asserted or assumed does the compiler walk backward through the operand
//! graph and encode the gates it reaches for the first time. Work per call is
//! bounded by the newly reached frontier: already-compiled gates stop the walk,
//! since everything below a compiled gate was compiled in the same pass.

use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use crate::reference::Ref;
use crate::solver::SatSolver;
use crate::space::VarSpace;
use crate::table::GateTable;
use crate::tseitin::Encoder;

/// Compile every not-yet-compiled gate reachable from `from`.
///
/// Assigns CNF variables to `from` and to all three wires of each newly
/// reached gate, grows the solver's variable count, then emits the clauses.
/// Returns the number of newly compiled gates.
pub fn add_reachable<S: SatSolver + ?Sized>(
    from: Ref,
    space: &mut VarSpace,
    table: &mut GateTable,
    encoder: &mut Encoder,
    solver: &mut S,
) -> usize {
    space.cnf_of(from);

    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([from.id()]);
    let mut fresh = Vec::new();

    while let Some(id) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        let Some(g) = table.defining(id) else {
            continue;
        };
        if table[g].is_compiled() {
            continue;
        }

        let [left, right] = table[g].inputs();
        let output = table[g].output();
        let cnf = [space.cnf_of(left), space.cnf_of(right), space.cnf_of(output)];
        trace!("compile: {} as {:?}", table[g], cnf);
        table[g].set_cnf(cnf);
        fresh.push(g);

        queue.push_back(left.id());
        queue.push_back(right.id());
    }

    let need = space.num_cnf();
    let have = solver.num_vars();
    if need > have {
        solver.new_vars(need - have);
    }

    for &g in &fresh {
        let gate = &table[g];
        let cnf = gate
            .cnf()
            .unwrap_or_else(|| panic!("Gate {} lost its CNF literals", gate));
        encoder.encode(solver, gate.op(), cnf);
    }

    debug!(
        "add_reachable(from = {}): {} new gates, {} cnf vars",
        from,
        fresh.len(),
        need
    );
    fresh.len()
}
