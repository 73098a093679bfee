//! Dual variable space: circuit variables and lazily-minted CNF variables.
//!
//! Circuit variables are handed out eagerly, one per [`next_circuit`][VarSpace::next_circuit]
//! call. A CNF variable is only created the first time its circuit variable is
//! needed by the solver, so circuits that are built but never asserted cost
//! nothing on the CNF side.
//!
//! Both directions of the mapping are keyed by the *unsigned* id, and the sign
//! of a reference is carried over to the literal, which gives
//! `cnf_of(-x) == -cnf_of(x)` for free.

use crate::reference::Ref;
use crate::types::{Lit, Var};

#[derive(Debug, Clone)]
pub struct VarSpace {
    /// Next circuit-variable id to hand out.
    next_circuit: u32,
    /// `forward[c]` is the CNF id of circuit variable `c`, or 0 if unmapped.
    forward: Vec<u32>,
    /// `backward[v]` is the circuit id that CNF variable `v` was minted for.
    backward: Vec<u32>,
}

impl Default for VarSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl VarSpace {
    pub fn new() -> Self {
        Self {
            next_circuit: 1,
            // Index 0 is a sentinel in both directions.
            forward: vec![0],
            backward: vec![0],
        }
    }

    /// Allocate a fresh circuit variable.
    pub fn next_circuit(&mut self) -> Ref {
        let id = self.next_circuit;
        self.next_circuit += 1;
        self.forward.push(0);
        Ref::positive(id)
    }

    /// Number of circuit variables allocated so far.
    pub fn num_circuit(&self) -> usize {
        (self.next_circuit - 1) as usize
    }

    /// Number of CNF variables minted so far (also the maximum CNF id).
    pub fn num_cnf(&self) -> usize {
        self.backward.len() - 1
    }

    /// Check whether the magnitude of `r` names an allocated circuit variable.
    pub fn contains(&self, r: Ref) -> bool {
        !r.is_zero() && r.id() < self.next_circuit
    }

    /// Return the CNF literal of `r`, minting a CNF variable on first use.
    pub fn cnf_of(&mut self, r: Ref) -> Lit {
        assert!(self.contains(r), "Circuit variable {} was never allocated", r);

        let id = r.id() as usize;
        if self.forward[id] == 0 {
            let v = self.backward.len() as u32;
            self.backward.push(r.id());
            self.forward[id] = v;
        }
        Var::new(self.forward[id]).pos().with_sign(r.is_negated())
    }

    /// Return the CNF literal of `r` if it has been mapped already.
    pub fn lookup(&self, r: Ref) -> Option<Lit> {
        let v = *self.forward.get(r.id() as usize)?;
        if r.is_zero() || v == 0 {
            return None;
        }
        Some(Var::new(v).pos().with_sign(r.is_negated()))
    }

    /// Return the (positive) circuit variable that CNF variable `var` stands for.
    pub fn circuit_of(&self, var: Var) -> Option<Ref> {
        self.backward
            .get(var.id() as usize)
            .map(|&id| Ref::positive(id))
    }

    /// Iterate over all `(cnf, circuit)` pairs, in CNF-id order.
    pub fn mapped(&self) -> impl Iterator<Item = (Var, Ref)> + '_ {
        self.backward
            .iter()
            .enumerate()
            .skip(1)
            .map(|(v, &id)| (Var::new(v as u32), Ref::positive(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_ids_are_sequential() {
        let mut space = VarSpace::new();
        assert_eq!(space.next_circuit(), Ref::new(1));
        assert_eq!(space.next_circuit(), Ref::new(2));
        assert_eq!(space.next_circuit(), Ref::new(3));
        assert_eq!(space.num_circuit(), 3);
        assert_eq!(space.num_cnf(), 0);
    }

    #[test]
    fn test_cnf_is_lazy_and_idempotent() {
        let mut space = VarSpace::new();
        let a = space.next_circuit();
        let b = space.next_circuit();
        let c = space.next_circuit();

        assert_eq!(space.lookup(a), None);

        // CNF ids follow first use, not allocation order.
        assert_eq!(space.cnf_of(c).to_dimacs(), 1);
        assert_eq!(space.cnf_of(a).to_dimacs(), 2);
        assert_eq!(space.cnf_of(c).to_dimacs(), 1);
        assert_eq!(space.num_cnf(), 2);
        assert_eq!(space.lookup(b), None);
        assert_eq!(space.lookup(c), Some(Lit::from_dimacs(1)));
    }

    #[test]
    fn test_negation_is_preserved() {
        let mut space = VarSpace::new();
        let a = space.next_circuit();
        let na = space.cnf_of(-a);
        assert!(na.is_negative());
        assert_eq!(space.cnf_of(a), -na);
        assert_eq!(space.lookup(-a), Some(na));
        assert_eq!(space.num_cnf(), 1);
    }

    #[test]
    fn test_reverse_mapping() {
        let mut space = VarSpace::new();
        let _ = space.next_circuit();
        let b = space.next_circuit();
        let lit = space.cnf_of(-b);
        assert_eq!(space.circuit_of(lit.var()), Some(b));
        let pairs: Vec<_> = space.mapped().collect();
        assert_eq!(pairs, vec![(Var::new(1), b)]);
    }

    #[test]
    fn test_contains() {
        let mut space = VarSpace::new();
        let a = space.next_circuit();
        assert!(space.contains(a));
        assert!(space.contains(-a));
        assert!(!space.contains(Ref::new(0)));
        assert!(!space.contains(Ref::new(2)));
    }
}
