//! Symbolic regression via genetic programming.
//!
//! Evolves a population of expression trees to approximate an unknown
//! function from sampled `(input, output)` pairs:
//!
//! - **Expression trees** ([`tree`]): terminals and fixed-arity functions
//!   (`sin cos e ln tg tanh abs + - * /`), random `Full`/`Grow` generation,
//!   path-addressed subtrees. Evaluation never yields `NaN` or `±∞`.
//! - **Population** ([`gp::Population`]): ramped half-and-half
//!   initialization, tournament selection, depth-bounded subtree crossover
//!   and mutation, single-elite advancement.
//! - **Training loop** ([`gp::GeneticAlgorithm`]): per-generation scoring
//!   (optionally parallel with the `parallel` feature), champion tracking
//!   over a fixed iteration budget.
//!
//! # Example
//!
//! ```
//! use u_symreg::gp::{Dataset, GeneticAlgorithm, Population, PopulationConfig, TrainConfig};
//! use u_symreg::tree::{FunctionSet, TerminalSet};
//!
//! let functions = FunctionSet::from_names([(1, vec!["sin"]), (2, vec!["+"])])?;
//! let terminals = TerminalSet::variables(1)?;
//! let config = PopulationConfig::default()
//!     .with_population_size(50)
//!     .with_selection_size(5)
//!     .with_init_depth(3)
//!     .with_max_depth(5)
//!     .with_seed(42);
//! let population = Population::new(config, functions, terminals)?;
//!
//! let dataset = Dataset::from_target((0..=10).map(|i| vec![i as f64 / 10.0]), |x| x[0].sin())?;
//! let mut ga = GeneticAlgorithm::new(
//!     population,
//!     &TrainConfig::default().with_train_iterations(50),
//!     dataset,
//! )?;
//! let result = ga.train()?;
//! println!("{} (error {:.3e})", result.best, result.best_error);
//! # Ok::<(), u_symreg::GpError>(())
//! ```

pub mod error;
pub mod gp;
pub mod random;
pub mod tree;

pub use error::{GpError, Result};
