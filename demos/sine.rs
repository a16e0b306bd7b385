//! Fits `0.1 · x² · sin(x)` on `[-10, 10)` and prints the champion.
//!
//! ```sh
//! RUST_LOG=info cargo run --release --example sine
//! ```

use u_symreg::gp::{Dataset, GeneticAlgorithm, Population, PopulationConfig, TrainConfig};
use u_symreg::tree::{FunctionSet, TerminalSet};

fn target(x: &[f64]) -> f64 {
    0.1 * x[0] * x[0] * x[0].sin()
}

fn main() -> Result<(), u_symreg::GpError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let functions = FunctionSet::from_names([
        (1, vec!["sin", "cos", "e", "ln", "tg", "tanh", "abs"]),
        (2, vec!["+", "-", "*", "/"]),
    ])?;
    let terminals = TerminalSet::variables(1)?;
    let dataset = Dataset::from_target((0..2000).map(|i| vec![-10.0 + i as f64 * 0.01]), target)?;

    let config = PopulationConfig::default()
        .with_population_size(500)
        .with_selection_size(20)
        .with_init_depth(6)
        .with_max_depth(20)
        .with_seed(42);
    let population = Population::new(config, functions, terminals)?;

    let train = TrainConfig::default()
        .with_train_iterations(300)
        .with_parallel(true)
        .with_log_interval(50);
    let mut ga = GeneticAlgorithm::new(population, &train, dataset)?;
    let result = ga.train()?;

    println!("best generation: {}", result.best_generation);
    println!("best error:      {:.6e}", result.best_error);
    println!("expression:      {}", result.best);
    println!();
    for x in [-7.5, -2.5, 0.0, 2.5, 7.5] {
        println!(
            "f({x:>5.1}) = {:>9.4}  predicted {:>9.4}",
            target(&[x]),
            result.best.evaluate(&[x])
        );
    }
    Ok(())
}
