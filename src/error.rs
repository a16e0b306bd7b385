//! Error types.
//!
//! Every variant is a configuration error detected at construction time.
//! Numeric domain conditions (division by zero, logarithm of a non-positive
//! argument, overflow) never surface here: evaluation absorbs them, see
//! [`clamp_finite`](crate::tree::clamp_finite).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GpError {
    #[error("population_size must be at least 1")]
    EmptyPopulation,

    #[error("selection_size must be in 1..={population_size}, got {selection_size}")]
    InvalidSelectionSize {
        selection_size: usize,
        population_size: usize,
    },

    #[error("max_depth ({max_depth}) must not be below init_depth ({init_depth})")]
    DepthOrder { init_depth: usize, max_depth: usize },

    #[error("mutation_rate must be in [0, 1], got {0}")]
    InvalidMutationRate(f64),

    #[error("function set is empty")]
    EmptyFunctionSet,

    #[error("terminal set is empty")]
    EmptyTerminalSet,

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("unknown terminal: {0}")]
    UnknownTerminal(String),

    #[error("unsupported arity {0}: only unary and binary functions exist")]
    UnsupportedArity(usize),

    #[error("function {name} has arity {actual}, listed under arity {declared}")]
    ArityMismatch {
        name: String,
        declared: usize,
        actual: usize,
    },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("dataset has {inputs} inputs but {labels} labels")]
    DatasetLengthMismatch { inputs: usize, labels: usize },

    #[error("input row {row} has width {found}, expected {expected}")]
    InputWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("label row {0} is empty")]
    EmptyLabel(usize),

    #[error("terminal x{variable} has no column in inputs of width {width}")]
    MissingVariable { variable: usize, width: usize },

    #[error("training run already completed")]
    RunCompleted,
}

pub type Result<T> = std::result::Result<T, GpError>;
