//! Gate table: a flat gate store plus two integer indices.
//!
//! Gates never point at each other. Every relation is an id-keyed index:
//! - `by_output`: circuit variable -> the gate that defines it,
//! - `dependents`: circuit variable -> gates that use it as an operand.
//!
//! Dedup is structural: a gate with the same canonical operands and operator
//! as an existing one is never created twice.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use crate::gate::{Gate, GateKey};
use crate::reference::Ref;

/// Index of a gate in the table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GateId(usize);

#[derive(Debug, Default, Clone)]
pub struct GateTable {
    gates: Vec<Gate>,
    by_output: HashMap<u32, GateId>,
    dependents: HashMap<u32, Vec<GateId>>,
}

impl GateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Return the gate whose output is the circuit variable `id`, if any.
    pub fn defining(&self, id: u32) -> Option<GateId> {
        self.by_output.get(&id).copied()
    }

    /// Return the gates using the circuit variable `id` (either polarity) as an operand.
    pub fn dependents(&self, id: u32) -> &[GateId] {
        self.dependents.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_dependents(&self, id: u32) -> bool {
        !self.dependents(id).is_empty()
    }

    /// Find an existing gate structurally equal to `key`.
    ///
    /// Only the dependents of the operand with the smaller dependent set are
    /// scanned, since any match must appear in both.
    pub fn find(&self, key: &GateKey) -> Option<GateId> {
        let left = self.dependents(key.left.id());
        let right = self.dependents(key.right.id());
        let candidates = if left.len() <= right.len() { left } else { right };
        candidates
            .iter()
            .copied()
            .find(|&g| self.gates[g.0].key() == *key)
    }

    /// Insert a new gate for `key` with the freshly allocated `output`.
    ///
    /// The caller must have checked with [`find`][GateTable::find] first.
    pub fn insert(&mut self, key: GateKey, output: Ref) -> GateId {
        debug_assert!(self.find(&key).is_none(), "Duplicate gate {:?}", key);

        let id = GateId(self.gates.len());
        self.gates.push(Gate::new(key, output));
        let previous = self.by_output.insert(output.id(), id);
        assert!(previous.is_none(), "Variable {} already defined by a gate", output);

        self.dependents.entry(key.left.id()).or_default().push(id);
        if key.right.id() != key.left.id() {
            self.dependents.entry(key.right.id()).or_default().push(id);
        }
        id
    }
}

impl Index<GateId> for GateTable {
    type Output = Gate;

    fn index(&self, id: GateId) -> &Self::Output {
        &self.gates[id.0]
    }
}

impl IndexMut<GateId> for GateTable {
    fn index_mut(&mut self, id: GateId) -> &mut Self::Output {
        &mut self.gates[id.0]
    }
}
