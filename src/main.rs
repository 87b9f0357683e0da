use clap::Parser;
use flappy_evo::simulation::evolution::EvolutionEngine;
use flappy_evo::simulation::params::Params;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand::rngs::StdRng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Evolve neural networks that play a Flappy-Bird-style game", long_about = None)]
struct Args {
    /// JSON file with parameter overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of generations to run (overrides the config)
    #[arg(long)]
    generations: Option<u32>,

    /// Agents per generation (overrides the config)
    #[arg(long)]
    population: Option<usize>,

    /// Seed for reproducible runs; a random one is drawn and logged otherwise
    #[arg(long)]
    seed: Option<u64>,

    /// Write per-generation fitness summaries to this JSON file
    #[arg(long)]
    stats: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut params = match &args.config {
        Some(path) => Params::from_json_file(path)?,
        None => Params::default(),
    };
    if let Some(generations) = args.generations {
        params.generations = generations;
    }
    if let Some(population) = args.population {
        params.population_size = population;
    }
    params.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    log::info!(
        "Starting evolution: {} agents, {} generations, seed {}",
        params.population_size,
        params.generations,
        seed
    );

    let generations = params.generations;
    let mut engine = EvolutionEngine::new(params, &mut rng)?;
    let mut population = engine.spawn_population(&mut rng)?;

    let history = engine.run(&mut population, generations, &mut rng)?;
    log::info!("Best fitness reached: {}", history.best_fitness());

    if let Some(path) = &args.stats {
        history.save_to_file(path)?;
        log::info!("Wrote generation stats to {}", path.display());
    }

    Ok(())
}
