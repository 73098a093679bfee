use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::reference::Ref;
use crate::types::Lit;

/// Two-input gate operators.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Op {
    And,
    Nand,
    Or,
    Nor,
    Xor,
}

impl Op {
    pub const ALL: [Op; 5] = [Op::And, Op::Nand, Op::Or, Op::Nor, Op::Xor];

    /// Truth table of the operator.
    pub fn eval(self, left: bool, right: bool) -> bool {
        match self {
            Op::And => left && right,
            Op::Nand => !(left && right),
            Op::Or => left || right,
            Op::Nor => !(left || right),
            Op::Xor => left != right,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Op::And => "and",
            Op::Nand => "nand",
            Op::Or => "or",
            Op::Nor => "nor",
            Op::Xor => "xor",
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Op::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown operator: {}", s))
    }
}

/// Structural identity of a gate: canonical operands plus operator.
///
/// Operands are ordered by signed value, so `(a, b)` and `(b, a)` share a key.
/// The output variable is not part of the key.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GateKey {
    pub left: Ref,
    pub op: Op,
    pub right: Ref,
}

impl GateKey {
    pub fn new(a: Ref, op: Op, b: Ref) -> Self {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        Self { left, op, right }
    }
}

/// CNF literals of a compiled gate, `[left, right, output]`.
pub type CnfTriple = [Lit; 3];

/// One two-input gate record.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Gate {
    key: GateKey,
    output: Ref,
    /// Set exactly once, when the gate is first reached by the compiler.
    cnf: Option<CnfTriple>,
}

impl Gate {
    pub(crate) fn new(key: GateKey, output: Ref) -> Self {
        assert!(!output.is_negated(), "Gate output must be a positive reference");
        Self {
            key,
            output,
            cnf: None,
        }
    }

    pub fn key(&self) -> GateKey {
        self.key
    }
    pub fn op(&self) -> Op {
        self.key.op
    }
    pub fn left(&self) -> Ref {
        self.key.left
    }
    pub fn right(&self) -> Ref {
        self.key.right
    }
    pub fn inputs(&self) -> [Ref; 2] {
        [self.key.left, self.key.right]
    }
    pub fn output(&self) -> Ref {
        self.output
    }

    pub fn is_compiled(&self) -> bool {
        self.cnf.is_some()
    }
    pub fn cnf(&self) -> Option<CnfTriple> {
        self.cnf
    }

    pub(crate) fn set_cnf(&mut self, cnf: CnfTriple) {
        assert!(self.cnf.is_none(), "Gate {} is already compiled", self);
        self.cnf = Some(cnf);
    }

    /// Given the value of one operand variable (unsigned `id`) return the other operand.
    pub fn other(&self, id: u32) -> Ref {
        if self.key.left.id() == id {
            self.key.right
        } else {
            debug_assert_eq!(self.key.right.id(), id);
            self.key.left
        }
    }

    /// Evaluate the gate given polarity-corrected operand values.
    pub fn eval(&self, left: bool, right: bool) -> bool {
        self.key.op.eval(left, right)
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {}({}, {})",
            self.output, self.key.op, self.key.left, self.key.right
        )
    }
}
