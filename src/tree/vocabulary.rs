//! Function and terminal vocabularies.

use super::symbols::{FunctionSymbol, TerminalSymbol};
use crate::error::{GpError, Result};
use rand::Rng;

/// Ordered set of function symbols available to tree generation.
///
/// # Examples
///
/// ```
/// use u_symreg::tree::FunctionSet;
///
/// let functions = FunctionSet::from_names([(1, vec!["sin"]), (2, vec!["+"])]).unwrap();
/// assert_eq!(functions.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<FunctionSymbol>", into = "Vec<FunctionSymbol>")
)]
pub struct FunctionSet {
    symbols: Vec<FunctionSymbol>,
}

impl FunctionSet {
    /// Builds a set from explicit symbols. Duplicates are dropped, order kept.
    pub fn new(symbols: impl IntoIterator<Item = FunctionSymbol>) -> Result<Self> {
        let mut unique = Vec::new();
        for symbol in symbols {
            if !unique.contains(&symbol) {
                unique.push(symbol);
            }
        }
        if unique.is_empty() {
            return Err(GpError::EmptyFunctionSet);
        }
        Ok(Self { symbols: unique })
    }

    /// Builds a set from `(arity, names)` groups.
    ///
    /// Each name must parse as a [`FunctionSymbol`] whose arity matches the
    /// group it is listed under.
    pub fn from_names<I, N, S>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, N)>,
        N: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut symbols = Vec::new();
        for (arity, names) in groups {
            if arity != 1 && arity != 2 {
                return Err(GpError::UnsupportedArity(arity));
            }
            for name in names {
                let symbol: FunctionSymbol = name.as_ref().parse()?;
                if symbol.arity() != arity {
                    return Err(GpError::ArityMismatch {
                        name: name.as_ref().to_string(),
                        declared: arity,
                        actual: symbol.arity(),
                    });
                }
                symbols.push(symbol);
            }
        }
        Self::new(symbols)
    }

    /// The full vocabulary: `sin cos e ln tg tanh abs + - * /`.
    pub fn standard() -> Self {
        Self {
            symbols: FunctionSymbol::ALL.to_vec(),
        }
    }

    pub fn symbols(&self) -> &[FunctionSymbol] {
        &self.symbols
    }

    /// Symbols of the given arity, in order.
    pub fn with_arity(&self, arity: usize) -> impl Iterator<Item = FunctionSymbol> + '_ {
        self.symbols.iter().copied().filter(move |s| s.arity() == arity)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Uniformly random symbol.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> FunctionSymbol {
        self.symbols[rng.random_range(0..self.symbols.len())]
    }
}

/// Ordered set of leaf symbols available to tree generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<TerminalSymbol>", into = "Vec<TerminalSymbol>")
)]
pub struct TerminalSet {
    symbols: Vec<TerminalSymbol>,
}

impl TerminalSet {
    pub fn new(symbols: impl IntoIterator<Item = TerminalSymbol>) -> Result<Self> {
        let symbols: Vec<TerminalSymbol> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(GpError::EmptyTerminalSet);
        }
        Ok(Self { symbols })
    }

    /// `x0..x{n-1}`.
    pub fn variables(n: usize) -> Result<Self> {
        Self::new((0..n).map(TerminalSymbol::Variable))
    }

    /// Parses names such as `"x0"` or `"1.5"`.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols = names
            .into_iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<TerminalSymbol>>>()?;
        Self::new(symbols)
    }

    pub fn symbols(&self) -> &[TerminalSymbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Highest variable index referenced, if any.
    pub fn max_variable(&self) -> Option<usize> {
        self.symbols
            .iter()
            .filter_map(|s| match s {
                TerminalSymbol::Variable(i) => Some(*i),
                TerminalSymbol::Constant(_) => None,
            })
            .max()
    }

    /// Uniformly random symbol.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> TerminalSymbol {
        self.symbols[rng.random_range(0..self.symbols.len())]
    }
}

impl TryFrom<Vec<FunctionSymbol>> for FunctionSet {
    type Error = GpError;

    fn try_from(symbols: Vec<FunctionSymbol>) -> Result<Self> {
        Self::new(symbols)
    }
}

impl From<FunctionSet> for Vec<FunctionSymbol> {
    fn from(set: FunctionSet) -> Self {
        set.symbols
    }
}

impl TryFrom<Vec<TerminalSymbol>> for TerminalSet {
    type Error = GpError;

    fn try_from(symbols: Vec<TerminalSymbol>) -> Result<Self> {
        Self::new(symbols)
    }
}

impl From<TerminalSet> for Vec<TerminalSymbol> {
    fn from(set: TerminalSet) -> Self {
        set.symbols
    }
}
