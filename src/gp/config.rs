//! GP configuration.
//!
//! [`PopulationConfig`] holds the parameters that shape a population and its
//! operators; [`TrainConfig`] holds the parameters of the training loop.

use super::fitness::ErrorMetric;
use crate::error::{GpError, Result};

/// Configuration for a [`Population`](super::Population).
///
/// # Defaults
///
/// ```
/// use u_symreg::gp::PopulationConfig;
///
/// let config = PopulationConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert_eq!(config.selection_size, 20);
/// assert_eq!(config.init_depth, 6);
/// assert_eq!(config.max_depth, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_symreg::gp::PopulationConfig;
///
/// let config = PopulationConfig::default()
///     .with_population_size(50)
///     .with_selection_size(5)
///     .with_init_depth(3)
///     .with_max_depth(5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationConfig {
    /// Number of chromosomes per generation.
    pub population_size: usize,

    /// Tournament size for parent selection (1..=population_size).
    pub selection_size: usize,

    /// Depth budget for the initial random generation.
    pub init_depth: usize,

    /// Hard depth bound for every chromosome after any operator.
    pub max_depth: usize,

    /// Probability of replacing a random subtree in each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Attempts at a depth-respecting crossover before falling back to a
    /// clone of the mother.
    pub crossover_retries: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            selection_size: 20,
            init_depth: 6,
            max_depth: 20,
            mutation_rate: 0.2,
            crossover_retries: 10,
            seed: None,
        }
    }
}

impl PopulationConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_selection_size(mut self, k: usize) -> Self {
        self.selection_size = k;
        self
    }

    /// Sets the initial depth budget.
    pub fn with_init_depth(mut self, depth: usize) -> Self {
        self.init_depth = depth;
        self
    }

    /// Sets the maximum depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`. `NaN` is kept so that
    /// [`validate`](Self::validate) reports it.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of crossover attempts (at least 1).
    pub fn with_crossover_retries(mut self, retries: usize) -> Self {
        self.crossover_retries = retries.max(1);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GpError::EmptyPopulation);
        }
        if self.selection_size == 0 || self.selection_size > self.population_size {
            return Err(GpError::InvalidSelectionSize {
                selection_size: self.selection_size,
                population_size: self.population_size,
            });
        }
        if self.max_depth < self.init_depth {
            return Err(GpError::DepthOrder {
                init_depth: self.init_depth,
                max_depth: self.max_depth,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GpError::InvalidMutationRate(self.mutation_rate));
        }
        Ok(())
    }
}

/// Configuration for a [`GeneticAlgorithm`](super::GeneticAlgorithm) run.
///
/// The iteration budget is the only termination condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainConfig {
    /// Number of generations to run.
    pub train_iterations: usize,

    /// Aggregate error used as fitness.
    pub metric: ErrorMetric,

    /// Whether to score individuals in parallel using rayon.
    ///
    /// Only effective with the `parallel` cargo feature.
    pub parallel: bool,

    /// Emit a `debug!` progress line every this many generations (0 = never).
    pub log_interval: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            train_iterations: 30_000,
            metric: ErrorMetric::default(),
            parallel: false,
            log_interval: 100,
        }
    }
}

impl TrainConfig {
    /// Sets the number of generations.
    pub fn with_train_iterations(mut self, n: usize) -> Self {
        self.train_iterations = n;
        self
    }

    /// Sets the error metric.
    pub fn with_metric(mut self, metric: ErrorMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the progress log interval.
    pub fn with_log_interval(mut self, every: usize) -> Self {
        self.log_interval = every;
        self
    }
}
