//! GP training loop.
//!
//! [`GeneticAlgorithm`] drives a [`Population`] through a fixed number of
//! generations: score → track champion → advance → repeat.

use super::config::TrainConfig;
use super::dataset::Dataset;
use super::population::Population;
use crate::error::{GpError, Result};
use crate::tree::{Chromosome, Node};
use log::{debug, info};

/// Lifecycle of a [`GeneticAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Constructed, not yet trained.
    Idle,
    /// Inside [`GeneticAlgorithm::train`].
    Running,
    /// Training finished; terminal.
    Completed,
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainResult {
    /// Clone of the best chromosome seen during the run.
    pub best: Chromosome,

    /// Error of `best` on the training dataset.
    pub best_error: f64,

    /// Loop index of the generation in which `best` was found.
    pub best_generation: usize,

    /// Number of generations scored.
    pub generations: usize,

    /// Champion error after each scored generation (non-increasing).
    pub error_history: Vec<f64>,
}

/// Executes the GP training loop.
///
/// # Usage
///
/// ```
/// use u_symreg::gp::{Dataset, GeneticAlgorithm, Population, PopulationConfig, TrainConfig};
/// use u_symreg::tree::{FunctionSet, TerminalSet};
///
/// let population = Population::new(
///     PopulationConfig::default()
///         .with_population_size(30)
///         .with_selection_size(3)
///         .with_init_depth(3)
///         .with_max_depth(5)
///         .with_seed(7),
///     FunctionSet::from_names([(1, vec!["sin"]), (2, vec!["+"])]).unwrap(),
///     TerminalSet::variables(1).unwrap(),
/// )
/// .unwrap();
/// let dataset = Dataset::new(
///     vec![vec![0.0], vec![1.0]],
///     vec![vec![0.0], vec![1.0f64.sin()]],
/// )
/// .unwrap();
///
/// let mut ga = GeneticAlgorithm::new(
///     population,
///     &TrainConfig::default().with_train_iterations(20),
///     dataset,
/// )
/// .unwrap();
/// let result = ga.train().unwrap();
/// assert!(result.best.evaluate(&[0.5]).is_finite());
/// ```
pub struct GeneticAlgorithm {
    population: Population,
    config: TrainConfig,
    dataset: Dataset,
    state: RunState,
}

impl GeneticAlgorithm {
    /// Validates that every variable terminal has a column in the dataset.
    pub fn new(population: Population, config: &TrainConfig, dataset: Dataset) -> Result<Self> {
        if let Some(variable) = population.terminals().max_variable() {
            if variable >= dataset.input_width() {
                return Err(GpError::MissingVariable {
                    variable,
                    width: dataset.input_width(),
                });
            }
        }
        Ok(Self {
            population,
            config: config.clone(),
            dataset,
            state: RunState::Idle,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Error of `tree` on the training dataset under the configured metric.
    pub fn error_of(&self, tree: &Node) -> f64 {
        self.config.metric.error(tree, &self.dataset)
    }

    /// Runs `train_iterations` generations and returns the champion.
    ///
    /// With zero iterations the initial generation is still scored and its
    /// best individual returned. A run can be trained once; later calls
    /// return [`GpError::RunCompleted`].
    pub fn train(&mut self) -> Result<TrainResult> {
        if self.state == RunState::Completed {
            return Err(GpError::RunCompleted);
        }
        self.state = RunState::Running;

        let iterations = self.config.train_iterations;
        let parallel = self.config.parallel;
        let metric = self.config.metric;
        let dataset = &self.dataset;
        let fitness = move |tree: &Node| metric.error(tree, dataset);

        info!(
            "training: population={}, iterations={}, metric={}",
            self.population.len(),
            iterations,
            metric.name()
        );

        let mut champion: Option<(Chromosome, f64, usize)> = None;
        let mut error_history = Vec::with_capacity(iterations.max(1));

        for gen in 0..iterations.max(1) {
            self.population.evaluate(&fitness, parallel);

            let candidate = self.population.best();
            let error = candidate.error().unwrap_or(f64::INFINITY);
            let improved = match &champion {
                None => true,
                Some((_, best, _)) => error < *best,
            };
            if improved {
                info!(
                    "generation {gen}: new best {} = {error:.6e} (size {}, depth {}): {candidate}",
                    metric.name(),
                    candidate.size(),
                    candidate.depth(),
                );
                champion = Some((candidate.clone(), error, gen));
            }

            let best_error = champion.as_ref().map_or(error, |(_, e, _)| *e);
            error_history.push(best_error);

            if self.config.log_interval > 0 && gen % self.config.log_interval == 0 {
                debug!(
                    "generation {gen}: best {} = {best_error:.6e}",
                    metric.name()
                );
            }

            if gen + 1 < iterations {
                self.population.advance(&fitness, parallel);
            }
        }

        self.state = RunState::Completed;

        let (best, best_error, best_generation) = champion
            .unwrap_or_else(|| unreachable!("at least one generation is always scored"));
        info!(
            "training complete: best {} = {best_error:.6e} found in generation {best_generation}",
            metric.name()
        );

        Ok(TrainResult {
            best,
            best_error,
            best_generation,
            generations: error_history.len(),
            error_history,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
