//! # circuit-rs: Boolean circuits on top of a SAT solver
//!
//! **`circuit-rs`** lets you build a combinational circuit out of two-input gates
//! (AND, NAND, OR, NOR, XOR), assert and assume facts about its wires, and ask a
//! SAT solver for a satisfying assignment, without ever writing a clause by hand.
//!
//! ## How it works
//!
//! The circuit and the CNF given to the solver live in two separate variable
//! spaces. Circuit variables are cheap: building a gate only records it. CNF
//! variables and clauses are created lazily, when an assertion or assumption
//! first reaches a gate through the operand graph, using the standard
//! **Tseitin** encoding. After a satisfiable solve, values are pushed back
//! through the circuit, so gates that never reached the solver still have
//! values whenever their inputs do.
//!
//! ## Key Features
//!
//! - **Session-Centric Architecture**: All operations go through the [`Session`][crate::session::Session].
//! - **Structural Sharing**: Building the same gate twice (in either operand order) returns the same wire.
//! - **Incremental**: Gates, assertions and assumptions can be added after a solve; each new fact only compiles the newly reached part of the circuit.
//! - **Signed References**: A [`Ref`][crate::reference::Ref] is a signed id, so `-x` is the negation of `x`.
//! - **Bounded Solving**: Wall-clock and conflict limits turn a long search into an `Unknown` verdict instead of a hang.
//!
//! ## Basic Usage
//!
//! ```rust
//! use circuit_rs::session::Session;
//! use circuit_rs::solver::SolveStatus;
//!
//! let mut s: Session = Session::default();
//! let a = s.var();
//! let b = s.var();
//! let c = s.var();
//!
//! // r2 = (a AND b) OR c
//! let r1 = s.and(a, b).unwrap();
//! let r2 = s.or(r1, c).unwrap();
//!
//! // Only NOT r2 is possible when a, b and c are all false.
//! s.assert(-r2).unwrap();
//! assert_eq!(s.solve(), SolveStatus::Satisfiable);
//! assert_eq!(s.value(a).unwrap(), false);
//! assert_eq!(s.value(c).unwrap(), false);
//!
//! // Forcing r1 contradicts NOT r2.
//! s.assert(r1).unwrap();
//! assert_eq!(s.solve(), SolveStatus::Unsatisfiable);
//! ```
//!
//! ## Core Components
//!
//! - **[`session`]**: The [`Session`][crate::session::Session] and its solve protocol.
//! - **[`compile`]**: Reachability-driven CNF emission.
//! - **[`extend`]**: Post-solve solution extension.
//! - **[`solver`]**: The contract with the SAT engine; [`cadical`] implements it.

pub mod cadical;
pub mod compile;
pub mod config;
pub mod dot;
pub mod error;
pub mod extend;
pub mod gate;
pub mod reference;
pub mod session;
pub mod solver;
pub mod space;
pub mod table;
pub mod tseitin;
pub mod types;
