//! Circuit to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Input variables** (not defined by any gate) are boxes at the bottom (sink rank)
//! - **Gate nodes** are labelled with their output variable and operator
//! - **Edges** run from each gate to its operands:
//!   - Solid lines for positive operands
//!   - Dotted lines with hollow circles for negated operands
//! - **Root nodes** are rendered as rectangles at the top (source rank)
//!
//! After a satisfiable solve, known values are appended to the labels.
//!
//! # Examples
//!
//! ```
//! use circuit_rs::session::Session;
//!
//! let mut s: Session = Session::default();
//! let a = s.var();
//! let b = s.var();
//! let f = s.and(a, -b).unwrap();
//!
//! let dot = s.to_dot(&[f]).unwrap();
//! assert!(dot.starts_with("digraph {"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::{BTreeSet, VecDeque};

use crate::reference::Ref;
use crate::session::Session;
use crate::solver::SatSolver;

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for gate nodes (default: "ellipse")
    pub gate_shape: &'static str,
    /// Shape for input variables (default: "box")
    pub input_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for negated operand edges (default: "dotted")
    pub negated_edge_style: &'static str,
    /// Whether to show values from the last satisfiable solve (default: true)
    pub show_values: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            gate_shape: "ellipse",
            input_shape: "box",
            root_shape: "rect",
            negated_edge_style: "dotted",
            show_values: true,
        }
    }
}

impl<S: SatSolver> Session<S> {
    /// Variables (unsigned ids) reachable from `roots` through gate operands.
    fn cone(&self, roots: &[Ref]) -> BTreeSet<u32> {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<u32> = roots.iter().map(|r| r.id()).collect();
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(gate) = self.gate_of(Ref::new(id as i32)) {
                queue.extend(gate.inputs().map(|r| r.id()));
            }
        }
        seen
    }

    pub fn to_dot(&self, roots: &[Ref]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    /// Render the cone of `roots`. Zero and unallocated roots are skipped.
    pub fn to_dot_with_config(&self, roots: &[Ref], config: &DotConfig) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let roots: Vec<Ref> = roots.iter().copied().filter(|&r| self.check(r).is_ok()).collect();

        let label = |id: u32| -> String {
            let value = if config.show_values { self.value(Ref::new(id as i32)).ok() } else { None };
            match value {
                Some(v) => format!("v{} = {}", id, v as u8),
                None => format!("v{}", id),
            }
        };

        let cone = self.cone(&roots);

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;

        writeln!(dot, "{{ rank=sink")?;
        for &id in cone.iter() {
            if self.gate_of(Ref::new(id as i32)).is_none() {
                writeln!(dot, "{} [shape={}, label=\"{}\"];", id, config.input_shape, label(id))?;
            }
        }
        writeln!(dot, "}}")?;

        for &id in cone.iter() {
            let Some(gate) = self.gate_of(Ref::new(id as i32)) else {
                continue;
            };
            writeln!(
                dot,
                "{} [shape={}, label=\"{}\\n{}\"];",
                id,
                config.gate_shape,
                label(id),
                gate.op()
            )?;
            for operand in gate.inputs() {
                if operand.is_negated() {
                    writeln!(
                        dot,
                        "{} -> {} [style={}, arrowhead=odot];",
                        id,
                        operand.id(),
                        config.negated_edge_style
                    )?;
                } else {
                    writeln!(dot, "{} -> {};", id, operand.id())?;
                }
            }
        }

        writeln!(dot, "{{ rank=source")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} [shape={}, label=\"{}\"];", i, config.root_shape, root)?;
        }
        writeln!(dot, "}}")?;

        for (i, &root) in roots.iter().enumerate() {
            if root.is_negated() {
                writeln!(dot, "r{} -> {} [arrowhead=odot];", i, root.id())?;
            } else {
                writeln!(dot, "r{} -> {};", i, root.id())?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
