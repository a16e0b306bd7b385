//! Random tree generation.
//!
//! The remaining depth budget is threaded explicitly through every recursive
//! call, so recursion depth is bounded by the initial budget.

use super::node::Node;
use super::vocabulary::{FunctionSet, TerminalSet};
use rand::Rng;

/// Tree-shape strategy for [`generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Functions at every level until the budget is spent: every leaf sits
    /// at exactly `depth_budget`.
    Full,
    /// Function or terminal with equal probability while budget remains.
    Grow,
}

/// Generates a random tree of depth at most `depth_budget`.
pub fn generate<R: Rng>(
    rng: &mut R,
    functions: &FunctionSet,
    terminals: &TerminalSet,
    depth_budget: usize,
    strategy: Strategy,
) -> Node {
    let pick_function = depth_budget > 0
        && match strategy {
            Strategy::Full => true,
            Strategy::Grow => rng.random_bool(0.5),
        };

    if !pick_function {
        return Node::Terminal(terminals.choose(rng));
    }

    let symbol = functions.choose(rng);
    let children = (0..symbol.arity())
        .map(|_| generate(rng, functions, terminals, depth_budget - 1, strategy))
        .collect();
    Node::Function(symbol, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Strategy;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn vocabulary() -> (FunctionSet, TerminalSet) {
        (FunctionSet::standard(), TerminalSet::variables(2).unwrap())
    }

    #[test]
    fn test_zero_budget_is_terminal() {
        let (f, t) = vocabulary();
        let mut rng = create_rng(42);
        for strategy in [Strategy::Full, Strategy::Grow] {
            let tree = generate(&mut rng, &f, &t, 0, strategy);
            assert!(tree.is_terminal());
        }
    }

    #[test]
    fn test_full_reaches_budget_on_every_branch() {
        let (f, t) = vocabulary();
        let mut rng = create_rng(7);
        let tree = generate(&mut rng, &f, &t, 4, Strategy::Full);
        assert_eq!(tree.depth(), 4);

        fn min_leaf_depth(node: &Node) -> usize {
            match node {
                Node::Terminal(_) => 0,
                Node::Function(_, children) => {
                    1 + children.iter().map(min_leaf_depth).min().unwrap_or(0)
                }
            }
        }
        assert_eq!(min_leaf_depth(&tree), 4);
    }

    #[test]
    fn test_grow_produces_varied_shapes() {
        let (f, t) = vocabulary();
        let mut rng = create_rng(11);
        let depths: std::collections::HashSet<usize> = (0..200)
            .map(|_| generate(&mut rng, &f, &t, 5, Strategy::Grow).depth())
            .collect();
        assert!(depths.len() > 2, "grow should vary depth, got {depths:?}");
    }

    proptest! {
        #[test]
        fn prop_depth_within_budget(
            seed in any::<u64>(),
            budget in 0usize..7,
            full in any::<bool>(),
        ) {
            let (f, t) = vocabulary();
            let mut rng = create_rng(seed);
            let strategy = if full { Strategy::Full } else { Strategy::Grow };
            let tree = generate(&mut rng, &f, &t, budget, strategy);
            prop_assert!(tree.depth() <= budget);
            prop_assert!(tree.is_well_formed());
        }

        #[test]
        fn prop_evaluation_is_finite(seed in any::<u64>(), x in -1e6f64..1e6, y in -1e6f64..1e6) {
            let (f, t) = vocabulary();
            let mut rng = create_rng(seed);
            let tree = generate(&mut rng, &f, &t, 6, Strategy::Grow);
            prop_assert!(tree.evaluate(&[x, y]).is_finite());
        }
    }
}
