//! One generation of chromosomes and the step to the next.

use super::config::PopulationConfig;
use super::operators::{subtree_crossover, subtree_mutation};
use super::selection::{best_index, tournament};
use crate::error::Result;
use crate::random::rng_from_option;
use crate::tree::{generate, Chromosome, FunctionSet, Node, Strategy, TerminalSet};
use log::trace;
use rand::rngs::StdRng;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A generation of exactly `population_size` chromosomes.
///
/// Owns the immutable run configuration, both vocabularies and the RNG that
/// drives initialization and every operator.
///
/// # Usage
///
/// ```
/// use u_symreg::gp::{Population, PopulationConfig};
/// use u_symreg::tree::{FunctionSet, TerminalSet};
///
/// let config = PopulationConfig::default()
///     .with_population_size(20)
///     .with_selection_size(4)
///     .with_init_depth(3)
///     .with_max_depth(5)
///     .with_seed(1);
/// let functions = FunctionSet::from_names([(1, vec!["sin"]), (2, vec!["+"])]).unwrap();
/// let terminals = TerminalSet::variables(1).unwrap();
///
/// let population = Population::new(config, functions, terminals).unwrap();
/// assert_eq!(population.len(), 20);
/// assert_eq!(population.generation(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Population {
    breeder: Breeder,
    individuals: Vec<Chromosome>,
    generation: usize,
}

/// Everything the variation operators touch, kept apart from the
/// individuals so parents can be borrowed while the RNG is advanced.
#[derive(Debug, Clone)]
struct Breeder {
    config: PopulationConfig,
    functions: FunctionSet,
    terminals: TerminalSet,
    rng: StdRng,
}

impl Population {
    /// Validates the configuration and fills generation 0.
    pub fn new(
        config: PopulationConfig,
        functions: FunctionSet,
        terminals: TerminalSet,
    ) -> Result<Self> {
        config.validate()?;
        let rng = rng_from_option(config.seed);
        let mut population = Self {
            individuals: Vec::with_capacity(config.population_size),
            breeder: Breeder {
                config,
                functions,
                terminals,
                rng,
            },
            generation: 0,
        };
        population.initialize();
        Ok(population)
    }

    /// Refills the population with random trees (ramped half-and-half).
    ///
    /// Strategies alternate `Full`/`Grow` with budget `init_depth`; every
    /// chromosome gets `gen = 0`.
    pub fn initialize(&mut self) {
        self.generation = 0;
        self.individuals.clear();
        for i in 0..self.breeder.config.population_size {
            let strategy = if i % 2 == 0 {
                Strategy::Full
            } else {
                Strategy::Grow
            };
            let root = self.breeder.generate(strategy);
            self.individuals.push(Chromosome::new(root, 0));
        }
    }

    pub fn config(&self) -> &PopulationConfig {
        &self.breeder.config
    }

    pub fn functions(&self) -> &FunctionSet {
        &self.breeder.functions
    }

    pub fn terminals(&self) -> &TerminalSet {
        &self.breeder.terminals
    }

    pub fn individuals(&self) -> &[Chromosome] {
        &self.individuals
    }

    /// Current generation index.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Scores every unscored chromosome with `fitness`.
    ///
    /// With the `parallel` feature and `parallel = true`, scoring runs on
    /// rayon's pool; each worker writes only its own chromosome's cache.
    /// Returns once every individual holds an error.
    pub fn evaluate<F>(&mut self, fitness: &F, parallel: bool)
    where
        F: Fn(&Node) -> f64 + Sync,
    {
        score_all(&mut self.individuals, fitness, parallel);
    }

    /// Lowest-error chromosome; the earliest one on ties.
    ///
    /// Unscored chromosomes rank last.
    pub fn best(&self) -> &Chromosome {
        &self.individuals[best_index(&self.individuals)]
    }

    /// Tournament selection over the current generation.
    ///
    /// Draws `selection_size` individuals with replacement and returns the
    /// one with the lowest error. Call once per parent slot; mother and
    /// father may coincide.
    pub fn select_parent(&mut self) -> &Chromosome {
        let idx = self.breeder.select(&self.individuals);
        &self.individuals[idx]
    }

    /// Subtree crossover of two parents.
    ///
    /// The child belongs to the generation under construction
    /// (`generation() + 1`). Falls back to a clone of `mother` when no
    /// depth-respecting graft is found within `crossover_retries` attempts.
    pub fn crossover(&mut self, mother: &Chromosome, father: &Chromosome) -> Chromosome {
        let root = self.breeder.crossover(mother.root(), father.root());
        Chromosome::new(root, self.generation + 1)
    }

    /// With probability `rate`, replaces a random subtree with a fresh one
    /// stamped `generation() + 1`; otherwise returns an unmodified clone.
    ///
    /// `rate` is clamped to `[0, 1]`; `NaN` never mutates.
    pub fn mutate(&mut self, chromosome: &Chromosome, rate: f64) -> Chromosome {
        match self.breeder.mutate(chromosome.root(), rate) {
            Some(root) => Chromosome::new(root, self.generation + 1),
            None => chromosome.clone(),
        }
    }

    /// Produces the next generation.
    ///
    /// Scores any unscored individual first, so selection always sees a
    /// fully evaluated generation. The single best individual survives
    /// unchanged; every other slot is filled by [`select_parent`] twice,
    /// then [`crossover`] and [`mutate`] at `mutation_rate`.
    ///
    /// [`select_parent`]: Self::select_parent
    /// [`crossover`]: Self::crossover
    /// [`mutate`]: Self::mutate
    pub fn advance<F>(&mut self, fitness: &F, parallel: bool)
    where
        F: Fn(&Node) -> f64 + Sync,
    {
        self.evaluate(fitness, parallel);

        let size = self.breeder.config.population_size;
        let rate = self.breeder.config.mutation_rate;
        let mut next: Vec<Chromosome> = Vec::with_capacity(size);
        next.push(self.best().clone());

        while next.len() < size {
            let m = self.breeder.select(&self.individuals);
            let f = self.breeder.select(&self.individuals);
            let child = self.breeder.offspring(
                &self.individuals[m],
                &self.individuals[f],
                rate,
                self.generation + 1,
            );
            next.push(child);
        }

        self.individuals = next;
        self.generation += 1;
    }
}

impl Breeder {
    fn generate(&mut self, strategy: Strategy) -> Node {
        generate(
            &mut self.rng,
            &self.functions,
            &self.terminals,
            self.config.init_depth,
            strategy,
        )
    }

    fn select(&mut self, individuals: &[Chromosome]) -> usize {
        tournament(individuals, self.config.selection_size, &mut self.rng)
    }

    fn crossover(&mut self, mother: &Node, father: &Node) -> Node {
        let (root, grafted) = subtree_crossover(
            mother,
            father,
            self.config.max_depth,
            self.config.crossover_retries,
            &mut self.rng,
        );
        if !grafted {
            trace!(
                "crossover found no graft within {} attempts, cloning mother",
                self.config.crossover_retries
            );
        }
        root
    }

    /// `None` when the coin flip at `rate` leaves the tree unchanged.
    fn mutate(&mut self, root: &Node, rate: f64) -> Option<Node> {
        let p = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        if !self.rng.random_bool(p) {
            return None;
        }
        Some(subtree_mutation(
            root,
            &self.functions,
            &self.terminals,
            self.config.max_depth,
            self.config.init_depth,
            &mut self.rng,
        ))
    }

    /// Crossover followed by mutation, stamped with `gen`.
    fn offspring(
        &mut self,
        mother: &Chromosome,
        father: &Chromosome,
        rate: f64,
        gen: usize,
    ) -> Chromosome {
        let root = self.crossover(mother.root(), father.root());
        let root = self.mutate(&root, rate).unwrap_or(root);
        Chromosome::new(root, gen)
    }
}

/// Scores every unscored chromosome.
#[cfg(feature = "parallel")]
fn score_all<F>(individuals: &mut [Chromosome], fitness: &F, parallel: bool)
where
    F: Fn(&Node) -> f64 + Sync,
{
    if parallel {
        individuals.par_iter_mut().for_each(|c| {
            c.score_with(fitness);
        });
    } else {
        for c in individuals.iter_mut() {
            c.score_with(fitness);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn score_all<F>(individuals: &mut [Chromosome], fitness: &F, _parallel: bool)
where
    F: Fn(&Node) -> f64 + Sync,
{
    for c in individuals.iter_mut() {
        c.score_with(fitness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GpError;
    use crate::gp::{Dataset, ErrorMetric};

    fn sine_setup(pop: usize, sel: usize) -> Population {
        let config = PopulationConfig::default()
            .with_population_size(pop)
            .with_selection_size(sel)
            .with_init_depth(3)
            .with_max_depth(5)
            .with_seed(42);
        let functions = FunctionSet::from_names([(1, vec!["sin"]), (2, vec!["+"])]).unwrap();
        let terminals = TerminalSet::variables(1).unwrap();
        Population::new(config, functions, terminals).unwrap()
    }

    fn sine_fitness() -> impl Fn(&Node) -> f64 + Sync {
        let data = Dataset::new(
            vec![vec![0.0], vec![1.0]],
            vec![vec![0.0], vec![1.0f64.sin()]],
        )
        .unwrap();
        move |tree: &Node| ErrorMetric::MeanSquared.error(tree, &data)
    }

    #[test]
    fn test_initialize_respects_init_depth() {
        let pop = sine_setup(40, 5);
        assert_eq!(pop.len(), 40);
        for c in pop.individuals() {
            assert!(c.depth() <= 3);
            assert!(c.root().is_well_formed());
            assert_eq!(c.gen(), 0);
            assert!(!c.is_scored());
        }
        // Full strategy on even slots reaches the budget exactly.
        assert_eq!(pop.individuals()[0].depth(), 3);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PopulationConfig::default()
            .with_population_size(4)
            .with_selection_size(5);
        let err = Population::new(
            config,
            FunctionSet::standard(),
            TerminalSet::variables(1).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, GpError::InvalidSelectionSize { .. }));
    }

    #[test]
    fn test_evaluate_scores_everyone() {
        let mut pop = sine_setup(20, 3);
        pop.evaluate(&sine_fitness(), false);
        assert!(pop.individuals().iter().all(Chromosome::is_scored));
    }

    #[test]
    fn test_full_tournament_selects_best() {
        let mut pop = sine_setup(30, 30);
        pop.evaluate(&sine_fitness(), false);
        let best = pop.best().clone();
        for _ in 0..20 {
            assert_eq!(pop.select_parent(), &best);
        }
    }

    #[test]
    fn test_advance_keeps_elite_and_stamps_generation() {
        let mut pop = sine_setup(30, 5);
        let fitness = sine_fitness();
        pop.evaluate(&fitness, false);
        let elite = pop.best().clone();

        pop.advance(&fitness, false);

        assert_eq!(pop.generation(), 1);
        assert_eq!(pop.len(), 30);
        assert_eq!(pop.individuals()[0], elite);
        for c in &pop.individuals()[1..] {
            assert_eq!(c.gen(), 1);
            assert!(c.depth() <= 5);
            assert!(c.root().is_well_formed());
        }
    }

    #[test]
    fn test_advance_scores_unscored_generation() {
        let mut pop = sine_setup(10, 2);
        let fitness = sine_fitness();
        // No explicit evaluate: advance must still see scored parents.
        pop.advance(&fitness, false);
        assert_eq!(pop.generation(), 1);
        assert!(pop.individuals()[0].is_scored());
    }

    #[test]
    fn test_best_error_never_worsens_across_generations() {
        let mut pop = sine_setup(30, 4);
        let fitness = sine_fitness();
        let mut previous = f64::INFINITY;
        for _ in 0..20 {
            pop.evaluate(&fitness, false);
            let e = pop.best().error().unwrap();
            assert!(e <= previous);
            previous = e;
            pop.advance(&fitness, false);
        }
    }

    #[test]
    fn test_single_individual_population() {
        let mut pop = sine_setup(1, 1);
        let fitness = sine_fitness();
        for _ in 0..5 {
            pop.advance(&fitness, false);
        }
        assert_eq!(pop.len(), 1);
        assert_eq!(pop.generation(), 5);
    }

    #[test]
    fn test_crossover_and_mutate_respect_max_depth() {
        let mut pop = sine_setup(20, 3);
        let parents: Vec<Chromosome> = pop.individuals().to_vec();
        for pair in parents.windows(2) {
            let child = pop.crossover(&pair[0], &pair[1]);
            assert_eq!(child.gen(), pop.generation() + 1);
            assert!(child.depth() <= 5);
            assert!(child.root().is_well_formed());
            let mutant = pop.mutate(&child, 1.0);
            assert!(mutant.depth() <= 5);
            assert!(mutant.root().is_well_formed());
        }
    }

    #[test]
    fn test_mutate_with_zero_rate_clones() {
        let mut pop = sine_setup(4, 2);
        let c = pop.individuals()[0].clone();
        assert_eq!(pop.mutate(&c, 0.0), c);
        assert_eq!(pop.mutate(&c, f64::NAN), c);
    }

    #[test]
    fn test_new_rejects_nan_mutation_rate() {
        let config = PopulationConfig::default()
            .with_population_size(4)
            .with_selection_size(2)
            .with_mutation_rate(f64::NAN);
        let result = Population::new(
            config,
            FunctionSet::standard(),
            TerminalSet::variables(1).unwrap(),
        );
        assert!(matches!(result, Err(GpError::InvalidMutationRate(_))));
    }

    #[test]
    fn test_advance_matches_public_operators() {
        let fitness = sine_fitness();
        let mut pop = sine_setup(12, 3);
        pop.evaluate(&fitness, false);
        let mut manual = pop.clone();

        pop.advance(&fitness, false);

        let rate = manual.config().mutation_rate;
        let mut expected = vec![manual.best().clone()];
        while expected.len() < manual.len() {
            let mother = manual.select_parent().clone();
            let father = manual.select_parent().clone();
            let child = manual.crossover(&mother, &father);
            expected.push(manual.mutate(&child, rate));
        }
        assert_eq!(pop.individuals(), &expected[..]);
        assert!(expected[1..].iter().all(|c| c.gen() == 1));
    }

    #[test]
    fn test_initialize_resets_generation() {
        let mut pop = sine_setup(6, 2);
        pop.advance(&sine_fitness(), false);
        pop.initialize();
        assert_eq!(pop.generation(), 0);
        assert!(pop.individuals().iter().all(|c| c.gen() == 0));
    }

    #[test]
    fn test_seeded_populations_match() {
        let a = sine_setup(10, 2);
        let b = sine_setup(10, 2);
        assert_eq!(a.individuals(), b.individuals());
    }
}
