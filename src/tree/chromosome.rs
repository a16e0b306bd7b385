//! Chromosome: an expression tree plus its bookkeeping.

use super::node::Node;
use crate::gp::Individual;

/// One candidate solution.
///
/// Carries the generation index it was created in and a lazily computed
/// error. Any structural change drops the cached error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    root: Node,
    gen: usize,
    error: Option<f64>,
}

impl Chromosome {
    pub fn new(root: Node, gen: usize) -> Self {
        Self {
            root,
            gen,
            error: None,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Generation index in which this chromosome was created.
    pub fn gen(&self) -> usize {
        self.gen
    }

    pub(crate) fn set_gen(&mut self, gen: usize) {
        self.gen = gen;
    }

    /// Cached error, if this chromosome has been scored since its last change.
    pub fn error(&self) -> Option<f64> {
        self.error
    }

    pub fn is_scored(&self) -> bool {
        self.error.is_some()
    }

    /// Scores the chromosome with `fitness` unless a cached value exists.
    pub fn score_with<F>(&mut self, fitness: F) -> f64
    where
        F: FnOnce(&Node) -> f64,
    {
        match self.error {
            Some(e) => e,
            None => {
                let e = fitness(&self.root);
                self.error = Some(e);
                e
            }
        }
    }

    /// Evaluates the expression at `input`. Always finite.
    pub fn evaluate(&self, input: &[f64]) -> f64 {
        self.root.evaluate(input)
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn size(&self) -> usize {
        self.root.size()
    }

    pub fn subtree_at(&self, path: &[usize]) -> Option<&Node> {
        self.root.subtree_at(path)
    }

    /// Replaces the subtree at `path` and invalidates the cached error.
    ///
    /// # Panics
    /// Panics if `path` does not address a node.
    pub fn replace_subtree(&mut self, path: &[usize], subtree: Node) -> Node {
        self.error = None;
        self.root.replace_subtree(path, subtree)
    }

    /// Replaces the whole tree and invalidates the cached error.
    pub fn set_root(&mut self, root: Node) {
        self.error = None;
        self.root = root;
    }

    pub fn into_root(self) -> Node {
        self.root
    }
}

impl Individual for Chromosome {
    /// Unscored chromosomes rank last.
    fn fitness(&self) -> f64 {
        self.error.unwrap_or(f64::INFINITY)
    }
}

impl std::fmt::Display for Chromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}
