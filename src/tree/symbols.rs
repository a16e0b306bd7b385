//! Terminal and function symbols.
//!
//! The function vocabulary is a closed set: each [`FunctionSymbol`] carries
//! its own arity, canonical name and evaluation rule. Every application goes
//! through [`clamp_finite`], so no operator can emit `NaN` or `±∞`.

use crate::error::GpError;
use std::fmt;
use std::str::FromStr;

/// Magnitude substituted for infinite results.
pub const SENTINEL: f64 = 1e10;

/// Maps any `f64` to a finite value.
///
/// - `NaN` → `0.0`
/// - `+∞` → [`SENTINEL`], `−∞` → `−SENTINEL`
/// - finite values pass through unchanged
#[inline]
pub fn clamp_finite(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else if value == f64::INFINITY {
        SENTINEL
    } else if value == f64::NEG_INFINITY {
        -SENTINEL
    } else {
        value
    }
}

/// A leaf symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminalSymbol {
    /// Reads column `index` of the input vector.
    Variable(usize),
    /// A literal constant.
    Constant(f64),
}

impl TerminalSymbol {
    /// Value of this terminal for the given input.
    ///
    /// Variables beyond the end of `input` read as `0.0`.
    #[inline]
    pub fn value(&self, input: &[f64]) -> f64 {
        match *self {
            TerminalSymbol::Variable(i) => clamp_finite(input.get(i).copied().unwrap_or(0.0)),
            TerminalSymbol::Constant(c) => clamp_finite(c),
        }
    }
}

impl fmt::Display for TerminalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalSymbol::Variable(i) => write!(f, "x{i}"),
            TerminalSymbol::Constant(c) => write!(f, "{c}"),
        }
    }
}

impl FromStr for TerminalSymbol {
    type Err = GpError;

    /// Parses `xN` as a variable and any float literal as a constant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(index) = s.strip_prefix('x') {
            return index
                .parse::<usize>()
                .map(TerminalSymbol::Variable)
                .map_err(|_| GpError::UnknownTerminal(s.to_string()));
        }
        match s.parse::<f64>() {
            Ok(c) if c.is_finite() => Ok(TerminalSymbol::Constant(c)),
            _ => Err(GpError::UnknownTerminal(s.to_string())),
        }
    }
}

/// An internal-node operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionSymbol {
    Sin,
    Cos,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Ln,
    Tan,
    Tanh,
    Abs,
    Add,
    Sub,
    Mul,
    Div,
}

impl FunctionSymbol {
    /// Every function symbol, unary first.
    pub const ALL: [FunctionSymbol; 11] = [
        FunctionSymbol::Sin,
        FunctionSymbol::Cos,
        FunctionSymbol::Exp,
        FunctionSymbol::Ln,
        FunctionSymbol::Tan,
        FunctionSymbol::Tanh,
        FunctionSymbol::Abs,
        FunctionSymbol::Add,
        FunctionSymbol::Sub,
        FunctionSymbol::Mul,
        FunctionSymbol::Div,
    ];

    /// Number of children a node with this symbol must have.
    pub fn arity(self) -> usize {
        match self {
            FunctionSymbol::Sin
            | FunctionSymbol::Cos
            | FunctionSymbol::Exp
            | FunctionSymbol::Ln
            | FunctionSymbol::Tan
            | FunctionSymbol::Tanh
            | FunctionSymbol::Abs => 1,
            FunctionSymbol::Add
            | FunctionSymbol::Sub
            | FunctionSymbol::Mul
            | FunctionSymbol::Div => 2,
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            FunctionSymbol::Sin => "sin",
            FunctionSymbol::Cos => "cos",
            FunctionSymbol::Exp => "e",
            FunctionSymbol::Ln => "ln",
            FunctionSymbol::Tan => "tg",
            FunctionSymbol::Tanh => "tanh",
            FunctionSymbol::Abs => "abs",
            FunctionSymbol::Add => "+",
            FunctionSymbol::Sub => "-",
            FunctionSymbol::Mul => "*",
            FunctionSymbol::Div => "/",
        }
    }

    /// Applies the operator and clamps the result to a finite value.
    ///
    /// # Panics
    /// Panics if `args.len()` differs from [`arity`](Self::arity).
    #[inline]
    pub fn apply(self, args: &[f64]) -> f64 {
        assert_eq!(
            args.len(),
            self.arity(),
            "{} expects {} argument(s)",
            self.name(),
            self.arity()
        );
        let raw = match self {
            FunctionSymbol::Sin => args[0].sin(),
            FunctionSymbol::Cos => args[0].cos(),
            FunctionSymbol::Exp => args[0].exp(),
            FunctionSymbol::Ln => args[0].ln(),
            FunctionSymbol::Tan => args[0].tan(),
            FunctionSymbol::Tanh => args[0].tanh(),
            FunctionSymbol::Abs => args[0].abs(),
            FunctionSymbol::Add => args[0] + args[1],
            FunctionSymbol::Sub => args[0] - args[1],
            FunctionSymbol::Mul => args[0] * args[1],
            FunctionSymbol::Div => args[0] / args[1],
        };
        clamp_finite(raw)
    }

    /// Whether the symbol renders between its operands.
    pub(crate) fn is_infix(self) -> bool {
        self.arity() == 2
    }
}

impl fmt::Display for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FunctionSymbol {
    type Err = GpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = match s.trim() {
            "sin" => FunctionSymbol::Sin,
            "cos" => FunctionSymbol::Cos,
            "e" | "exp" => FunctionSymbol::Exp,
            "ln" | "log" => FunctionSymbol::Ln,
            "tg" | "tan" => FunctionSymbol::Tan,
            "tanh" => FunctionSymbol::Tanh,
            "abs" => FunctionSymbol::Abs,
            "+" => FunctionSymbol::Add,
            "-" => FunctionSymbol::Sub,
            "*" => FunctionSymbol::Mul,
            "/" => FunctionSymbol::Div,
            other => return Err(GpError::UnknownFunction(other.to_string())),
        };
        Ok(symbol)
    }
}
