//! Tournament selection.
//!
//! Draw `k` individuals uniformly at random with replacement and keep the one
//! with the lowest error. Larger `k` means stronger selection pressure:
//!
//! - k=2: light pressure (good for diversity)
//! - k=3-20: moderate pressure
//! - k=n: the tournament spans the whole population and always returns the
//!   best individual
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Koza (1992), *Genetic Programming*

use super::types::Individual;
use rand::Rng;

/// Returns the index of the tournament winner.
///
/// Ties go to the individual drawn first. When `k >= population.len()` the
/// tournament covers the whole population and the best index is returned
/// directly (lowest index among equals).
///
/// # Complexity
/// O(k) per selection, O(n) when `k >= n`
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();
    let k = k.max(1);

    if k >= n {
        return best_index(population);
    }

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Index of the individual with the lowest error; the first one on ties.
///
/// # Panics
/// Panics if `population` is empty.
pub fn best_index<I: Individual>(population: &[I]) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.fitness() < population[best].fitness() {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[derive(Clone)]
    struct TestInd {
        fit: f64,
    }

    impl Individual for TestInd {
        fn fitness(&self) -> f64 {
            self.fit
        }
    }

    fn make_population(fitnesses: &[f64]) -> Vec<TestInd> {
        fitnesses.iter().map(|&f| TestInd { fit: f }).collect()
    }

    #[test]
    fn test_full_tournament_always_picks_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            assert_eq!(tournament(&pop, 4, &mut rng), 2);
        }
        assert_eq!(tournament(&pop, 100, &mut rng), 2);
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0, 7.0, 6.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 6];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 3, &mut rng)] += 1;
        }
        // 1 - (5/6)^3 ≈ 0.42
        assert!(
            counts[2] > 3500,
            "expected best to win often, got {}/{n}",
            counts[2]
        );
        assert!(counts[2] > counts[0]);
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_size_zero_treated_as_one() {
        let pop = make_population(&[3.0, 2.0, 1.0]);
        let mut rng = create_rng(5);
        let idx = tournament(&pop, 0, &mut rng);
        assert!(idx < 3);
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        assert_eq!(tournament(&pop, 3, &mut rng), 0);
    }

    #[test]
    fn test_best_index_ties_keep_first() {
        let pop = make_population(&[4.0, 1.0, 1.0, 3.0]);
        assert_eq!(best_index(&pop), 1);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<TestInd> = vec![];
        let mut rng = create_rng(42);
        tournament(&pop, 3, &mut rng);
    }
}
