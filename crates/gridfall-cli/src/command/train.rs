use gridfall_evaluator::FEATURE_COUNT;
use gridfall_training::genetic::Population;
use serde::Serialize;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Population size
    #[arg(long, default_value_t = 500)]
    population: usize,
    /// Number of offspring bred each generation
    #[arg(long, default_value_t = 150)]
    offspring: usize,
    /// Games played per weight vector each generation
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Number of generations
    #[arg(long, default_value_t = 100)]
    generations: usize,
    /// Move cutoff per game
    #[arg(long, default_value_t = 100_000)]
    cutoff: usize,
}

/// Final report printed to stdout once training finishes.
#[derive(Debug, Serialize)]
struct TrainedModel {
    weights: [f64; FEATURE_COUNT],
    fitness: f64,
    generations: usize,
    games_per_vector: usize,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    anyhow::ensure!(arg.population >= 2, "population needs at least two vectors");
    anyhow::ensure!(
        arg.offspring <= arg.population,
        "offspring count cannot exceed the population size"
    );

    let mut rng = rand::rng();
    let mut population = Population::random(arg.population, &mut rng);

    for generation in 0..arg.generations {
        population.evaluate_fitness(arg.games, arg.cutoff);

        let best = &population.members()[0];
        eprintln!(
            "generation {:>3}: best fitness {:.3}",
            generation + 1,
            best.fitness()
        );
        eprintln!("  weights: {:.4?}", best.weights());
        if let Some(stats) = population.fitness_summary() {
            eprintln!(
                "  fitness: min {:.3}  mean {:.3}  median {:.3}  max {:.3}  std dev {:.3}",
                stats.min, stats.mean, stats.median, stats.max, stats.std_dev
            );
        }

        if generation + 1 < arg.generations {
            population.breed_generation(arg.offspring);
        }
    }

    let best = &population.members()[0];
    let model = TrainedModel {
        weights: *best.weights(),
        fitness: best.fitness(),
        generations: arg.generations,
        games_per_vector: arg.games,
    };
    println!("{}", serde_json::to_string_pretty(&model)?);

    Ok(())
}
