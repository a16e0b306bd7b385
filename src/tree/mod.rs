//! Expression trees.
//!
//! - [`Node`]: recursive formula of terminals and fixed-arity functions
//! - [`Chromosome`]: a tree plus creation generation and cached error
//! - [`generate`]: random construction under a depth budget
//!   ([`Strategy::Full`] / [`Strategy::Grow`])
//! - [`FunctionSet`] / [`TerminalSet`]: the vocabularies trees are drawn from
//!
//! Evaluation is total: every operator application is passed through
//! [`clamp_finite`], so `evaluate` never returns `NaN` or `±∞`.

mod chromosome;
mod generate;
mod node;
mod symbols;
mod vocabulary;

pub use chromosome::Chromosome;
pub use generate::{generate, Strategy};
pub use node::Node;
pub use symbols::{clamp_finite, FunctionSymbol, TerminalSymbol, SENTINEL};
pub use vocabulary::{FunctionSet, TerminalSet};
