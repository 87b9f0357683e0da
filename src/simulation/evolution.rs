//! Generational loop: simulate an episode, record fitness, evolve.

use ndarray_rand::rand::Rng;

use super::error::Result;
use super::params::Params;
use super::population::Population;
use super::stats::{GenerationStats, History};
use super::world::World;

/// Runs episodes on a world and evolves the population between them.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    world: World,
    history: History,
}

impl EvolutionEngine {
    /// Creates an engine around a fresh world.
    pub fn new<R: Rng + ?Sized>(params: Params, rng: &mut R) -> Result<Self> {
        Ok(Self {
            world: World::new(params, rng)?,
            history: History::default(),
        })
    }

    /// Parameters shared by the world and the evolution step.
    pub fn params(&self) -> &Params {
        self.world.params()
    }

    /// The simulated world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Summaries of every generation run so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Creates a population sized and shaped by the parameters.
    pub fn spawn_population<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Population> {
        let params = self.params();
        Population::new(params.population_size, &params.topology, rng)
    }

    /// Simulates one episode, records its fitness summary, then evolves.
    ///
    /// The returned summary describes the generation that just played, not
    /// the offspring produced afterwards.
    pub fn run_generation<R: Rng + ?Sized>(
        &mut self,
        population: &mut Population,
        rng: &mut R,
    ) -> Result<GenerationStats> {
        let outcome = self.world.run_episode(population, rng)?;

        let stats = GenerationStats {
            generation: population.generation(),
            population: population.size(),
            average_fitness: population.average_fitness(),
            best_fitness: population.best_fitness(),
            best_milestones: population.best_milestones(),
            steps: outcome.steps,
            pipes_passed: outcome.pipes_passed,
        };
        self.history.record(stats.clone());

        let params = self.world.params();
        population.evolve(params.survival_fraction, params.mutation_rate, rng)?;

        Ok(stats)
    }

    /// Runs `generations` episode/evolve cycles.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        population: &mut Population,
        generations: u32,
        rng: &mut R,
    ) -> Result<&History> {
        for _ in 0..generations {
            let stats = self.run_generation(population, rng)?;
            log::info!(
                "generation {}: average fitness {:.1}, best fitness {:.0}, pipes passed {}",
                stats.generation,
                stats.average_fitness,
                stats.best_fitness,
                stats.pipes_passed,
            );
        }

        Ok(&self.history)
    }
}
