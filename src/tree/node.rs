//! Expression tree nodes.
//!
//! A [`Node`] exclusively owns its children; there are no back-references.
//! Subtrees are addressed by a *path*: the sequence of child indices walked
//! from the root (the empty path is the root itself).

use super::symbols::{FunctionSymbol, TerminalSymbol};
#[cfg(feature = "serde")]
use crate::error::GpError;
use std::fmt;

/// One node of an expression tree.
///
/// Invariant: for every `Function(symbol, children)`,
/// `children.len() == symbol.arity()`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "NodeRepr"))]
pub enum Node {
    Terminal(TerminalSymbol),
    Function(FunctionSymbol, Vec<Node>),
}

/// Unchecked wire form. Children deserialize as [`Node`], so the arity
/// check runs at every level.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
enum NodeRepr {
    Terminal(TerminalSymbol),
    Function(FunctionSymbol, Vec<Node>),
}

#[cfg(feature = "serde")]
impl TryFrom<NodeRepr> for Node {
    type Error = GpError;

    fn try_from(repr: NodeRepr) -> Result<Self, GpError> {
        match repr {
            NodeRepr::Terminal(t) => Ok(Node::Terminal(t)),
            NodeRepr::Function(symbol, children) => {
                if children.len() != symbol.arity() {
                    return Err(GpError::ArityMismatch {
                        name: symbol.name().to_string(),
                        declared: children.len(),
                        actual: symbol.arity(),
                    });
                }
                Ok(Node::Function(symbol, children))
            }
        }
    }
}

impl Node {
    pub fn variable(index: usize) -> Self {
        Node::Terminal(TerminalSymbol::Variable(index))
    }

    pub fn constant(value: f64) -> Self {
        Node::Terminal(TerminalSymbol::Constant(value))
    }

    /// Builds a function node.
    ///
    /// # Panics
    /// Panics if `children.len()` differs from the symbol's arity.
    pub fn function(symbol: FunctionSymbol, children: Vec<Node>) -> Self {
        assert_eq!(
            children.len(),
            symbol.arity(),
            "arity mismatch for {}",
            symbol.name()
        );
        Node::Function(symbol, children)
    }

    pub fn unary(symbol: FunctionSymbol, child: Node) -> Self {
        Self::function(symbol, vec![child])
    }

    pub fn binary(symbol: FunctionSymbol, left: Node, right: Node) -> Self {
        Self::function(symbol, vec![left, right])
    }

    /// Evaluates the expression at `input`.
    ///
    /// The result is always finite: every operator application is clamped.
    pub fn evaluate(&self, input: &[f64]) -> f64 {
        match self {
            Node::Terminal(t) => t.value(input),
            Node::Function(symbol, children) => match children.as_slice() {
                [a] => symbol.apply(&[a.evaluate(input)]),
                [a, b] => symbol.apply(&[a.evaluate(input), b.evaluate(input)]),
                _ => symbol.apply(&children.iter().map(|c| c.evaluate(input)).collect::<Vec<_>>()),
            },
        }
    }

    /// Longest root-to-leaf path, in edges. A lone terminal has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Terminal(_) => 0,
            Node::Function(_, children) => {
                1 + children.iter().map(Node::depth).max().unwrap_or(0)
            }
        }
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        match self {
            Node::Terminal(_) => 1,
            Node::Function(_, children) => 1 + children.iter().map(Node::size).sum::<usize>(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Terminal(_) => &[],
            Node::Function(_, children) => children,
        }
    }

    /// Checks the arity invariant over the whole tree.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Node::Terminal(_) => true,
            Node::Function(symbol, children) => {
                children.len() == symbol.arity() && children.iter().all(Node::is_well_formed)
            }
        }
    }

    /// Subtree at `path`, or `None` if the path leaves the tree.
    pub fn subtree_at(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self;
        for &i in path {
            node = node.children().get(i)?;
        }
        Some(node)
    }

    pub fn subtree_at_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let mut node = self;
        for &i in path {
            node = match node {
                Node::Terminal(_) => return None,
                Node::Function(_, children) => children.get_mut(i)?,
            };
        }
        Some(node)
    }

    /// Replaces the subtree at `path`, returning the detached one.
    ///
    /// A node is swapped for a node, so the arity of every surrounding
    /// function is untouched.
    ///
    /// # Panics
    /// Panics if `path` does not address a node of this tree.
    pub fn replace_subtree(&mut self, path: &[usize], subtree: Node) -> Node {
        let slot = self
            .subtree_at_mut(path)
            .unwrap_or_else(|| panic!("path {path:?} does not address a node"));
        std::mem::replace(slot, subtree)
    }

    /// Path of the `index`-th node in pre-order, or `None` if
    /// `index >= self.size()`.
    pub fn nth_path(&self, index: usize) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut remaining = index;
        let mut node = self;
        loop {
            if remaining == 0 {
                return Some(path);
            }
            remaining -= 1;
            let mut descended = false;
            for (i, child) in node.children().iter().enumerate() {
                let size = child.size();
                if remaining < size {
                    path.push(i);
                    node = child;
                    descended = true;
                    break;
                }
                remaining -= size;
            }
            if !descended {
                return None;
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Terminal(t) => write!(f, "{t}"),
            Node::Function(symbol, children) if symbol.is_infix() && children.len() == 2 => {
                write!(f, "({} {} {})", children[0], symbol, children[1])
            }
            Node::Function(symbol, children) => {
                write!(f, "{symbol}(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SENTINEL;
    use FunctionSymbol::*;

    /// sin(x0) + (x0 * 2)
    fn sample() -> Node {
        Node::binary(
            Add,
            Node::unary(Sin, Node::variable(0)),
            Node::binary(Mul, Node::variable(0), Node::constant(2.0)),
        )
    }

    #[test]
    fn test_evaluate() {
        let tree = sample();
        let x = 0.7;
        assert!((tree.evaluate(&[x]) - (x.sin() + 2.0 * x)).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_clamps_inner_singularity() {
        // ln(x0 / x0) at 0: 0/0 is NaN → 0, ln(0) is −∞ → −SENTINEL
        let tree = Node::unary(
            Ln,
            Node::binary(Div, Node::variable(0), Node::variable(0)),
        );
        let v = tree.evaluate(&[0.0]);
        assert!(v.is_finite());
        assert_eq!(v, -SENTINEL);
    }

    #[test]
    fn test_depth_and_size() {
        let tree = sample();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.size(), 6);
        assert_eq!(Node::variable(0).depth(), 0);
        assert_eq!(Node::variable(0).size(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "(sin(x0) + (x0 * 2))");
    }

    #[test]
    fn test_subtree_addressing() {
        let tree = sample();
        assert_eq!(tree.subtree_at(&[]), Some(&tree));
        assert_eq!(tree.subtree_at(&[0, 0]), Some(&Node::variable(0)));
        assert_eq!(tree.subtree_at(&[1, 1]), Some(&Node::constant(2.0)));
        assert_eq!(tree.subtree_at(&[2]), None);
        assert_eq!(tree.subtree_at(&[0, 0, 0]), None);
    }

    #[test]
    fn test_replace_subtree() {
        let mut tree = sample();
        let old = tree.replace_subtree(&[1], Node::variable(0));
        assert_eq!(old, Node::binary(Mul, Node::variable(0), Node::constant(2.0)));
        assert_eq!(tree.to_string(), "(sin(x0) + x0)");
        assert!(tree.is_well_formed());
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_replace_root() {
        let mut tree = sample();
        tree.replace_subtree(&[], Node::constant(1.0));
        assert_eq!(tree, Node::constant(1.0));
    }

    #[test]
    #[should_panic(expected = "does not address a node")]
    fn test_replace_invalid_path_panics() {
        let mut tree = sample();
        tree.replace_subtree(&[0, 1], Node::constant(1.0));
    }

    #[test]
    fn test_nth_path_preorder() {
        let tree = sample();
        let paths: Vec<Vec<usize>> = (0..tree.size()).map(|i| tree.nth_path(i).unwrap()).collect();
        assert_eq!(
            paths,
            vec![
                vec![],
                vec![0],
                vec![0, 0],
                vec![1],
                vec![1, 0],
                vec![1, 1],
            ]
        );
        assert_eq!(tree.nth_path(6), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let source = sample();
        let mut copy = source.clone();
        copy.replace_subtree(&[0, 0], Node::constant(9.0));
        assert_eq!(source, sample());
        assert_ne!(copy, source);
    }

    #[test]
    fn test_is_well_formed_detects_bad_arity() {
        let bad = Node::Function(Add, vec![Node::variable(0)]);
        assert!(!bad.is_well_formed());
        let nested = Node::unary(Sin, bad);
        assert!(!nested.is_well_formed());
    }

    #[test]
    #[should_panic(expected = "arity mismatch")]
    fn test_function_constructor_checks_arity() {
        Node::function(Sin, vec![Node::variable(0), Node::variable(0)]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_arity_at_every_level() {
        let tree = sample();
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(serde_json::from_str::<Node>(&json).unwrap(), tree);

        let bad_root = r#"{"Function":["Sin",[]]}"#;
        assert!(serde_json::from_str::<Node>(bad_root).is_err());
        let bad_child = concat!(
            r#"{"Function":["Sin",[{"Function":["Add","#,
            r#"[{"Terminal":{"Variable":0}}]]}]]}"#,
        );
        assert!(serde_json::from_str::<Node>(bad_child).is_err());
    }
}
