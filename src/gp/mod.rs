//! Genetic programming engine.
//!
//! Evolves [`Chromosome`](crate::tree::Chromosome)s against a fixed
//! [`Dataset`] for a fixed number of generations.
//!
//! # Key Types
//!
//! - [`PopulationConfig`] / [`TrainConfig`]: run parameters (builder style)
//! - [`Population`]: one generation; initialization, selection, operators,
//!   elitist advancement
//! - [`GeneticAlgorithm`]: the training loop and champion tracking
//! - [`TrainResult`]: champion, its error and discovery generation
//!
//! # Submodules
//!
//! - [`operators`]: subtree crossover and subtree mutation
//! - [`selection`]: tournament selection
//!
//! # References
//!
//! - Koza (1992), *Genetic Programming*
//! - Poli, Langdon & McPhee (2008), *A Field Guide to Genetic Programming*

mod algorithm;
mod config;
mod dataset;
mod fitness;
pub mod operators;
mod population;
pub mod selection;
mod types;

pub use algorithm::{GeneticAlgorithm, RunState, TrainResult};
pub use config::{PopulationConfig, TrainConfig};
pub use dataset::Dataset;
pub use fitness::ErrorMetric;
pub use population::Population;
pub use types::Individual;
