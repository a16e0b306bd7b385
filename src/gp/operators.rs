//! Subtree crossover and mutation.
//!
//! Both operators address nodes uniformly at random over the pre-order
//! enumeration of a tree and keep two invariants:
//!
//! - every function node has exactly as many children as its arity
//! - the offspring's depth never exceeds `max_depth`
//!
//! # References
//!
//! - Koza (1992), *Genetic Programming: On the Programming of Computers by
//!   Means of Natural Selection*
//! - Poli, Langdon & McPhee (2008), *A Field Guide to Genetic Programming*

use crate::tree::{generate, FunctionSet, Node, Strategy, TerminalSet};
use rand::Rng;

/// Uniformly random node address in `tree`.
pub fn random_path<R: Rng>(tree: &Node, rng: &mut R) -> Vec<usize> {
    let index = rng.random_range(0..tree.size());
    tree.nth_path(index)
        .unwrap_or_else(|| unreachable!("pre-order index {index} lies within tree size"))
}

/// Subtree crossover.
///
/// Picks a random address in each parent and grafts the father's subtree
/// onto the mother at her address. Grafts that would push the depth past
/// `max_depth` are rejected and retried with fresh addresses, up to
/// `max_attempts` times. On exhaustion the mother is returned unmodified, so
/// the operator always terminates.
///
/// Returns the child and whether a graft took place.
///
/// # Panics
/// Panics if the mother already exceeds `max_depth`.
pub fn subtree_crossover<R: Rng>(
    mother: &Node,
    father: &Node,
    max_depth: usize,
    max_attempts: usize,
    rng: &mut R,
) -> (Node, bool) {
    assert!(
        mother.depth() <= max_depth,
        "mother depth {} exceeds max_depth {max_depth}",
        mother.depth()
    );

    for _ in 0..max_attempts.max(1) {
        let at = random_path(mother, rng);
        let from = random_path(father, rng);
        let donor = father
            .subtree_at(&from)
            .unwrap_or_else(|| unreachable!("random_path addresses a node"));

        // Every other branch of the mother already respects max_depth.
        if at.len() + donor.depth() > max_depth {
            continue;
        }

        let mut child = mother.clone();
        child.replace_subtree(&at, donor.clone());
        check_offspring(&child, max_depth);
        return (child, true);
    }

    (mother.clone(), false)
}

/// Subtree mutation.
///
/// Replaces a random subtree with a fresh [`Strategy::Grow`] tree whose
/// budget is the depth left at that address, capped at `subtree_depth`.
///
/// # Panics
/// Panics if `tree` already exceeds `max_depth`.
pub fn subtree_mutation<R: Rng>(
    tree: &Node,
    functions: &FunctionSet,
    terminals: &TerminalSet,
    max_depth: usize,
    subtree_depth: usize,
    rng: &mut R,
) -> Node {
    assert!(
        tree.depth() <= max_depth,
        "tree depth {} exceeds max_depth {max_depth}",
        tree.depth()
    );

    let at = random_path(tree, rng);
    let budget = (max_depth - at.len()).min(subtree_depth);
    let fresh = generate(rng, functions, terminals, budget, Strategy::Grow);

    let mut child = tree.clone();
    child.replace_subtree(&at, fresh);
    check_offspring(&child, max_depth);
    child
}

/// Programming-contract check on operator output.
fn check_offspring(child: &Node, max_depth: usize) {
    assert!(child.is_well_formed(), "offspring violates arity: {child}");
    assert!(
        child.depth() <= max_depth,
        "offspring depth {} exceeds max_depth {max_depth}",
        child.depth()
    );
}
