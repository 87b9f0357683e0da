//! Fixed-size population of agents and its generational update.
//!
//! Selection keeps the fittest fraction of agents unchanged and refills the
//! population with mutated offspring of uniformly chosen survivors.

use geo::Coord;
use ndarray_rand::rand::Rng;

use super::agent::Agent;
use super::error::{EvoError, Result};

/// A generation of agents.
///
/// Holds exactly `size` members at all times, including right after
/// [`evolve`](Population::evolve).
#[derive(Debug, Clone)]
pub struct Population {
    size: usize,
    members: Vec<Agent>,
    generation: u32,
}

impl Population {
    /// Creates `size` agents, each with an independently randomised brain.
    pub fn new<R: Rng + ?Sized>(size: usize, topology: &[usize], rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(EvoError::InvalidPopulationSize);
        }

        let members = (0..size)
            .map(|_| Agent::new_random(topology, rng))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            size,
            members,
            generation: 0,
        })
    }

    /// Number of agents, fixed for the population's lifetime.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of completed evolution steps.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Current agents in population order.
    pub fn members(&self) -> &[Agent] {
        &self.members
    }

    /// Mutable access for the environment. The slice length cannot change.
    pub fn members_mut(&mut self) -> &mut [Agent] {
        &mut self.members
    }

    /// Resets every agent to the same start state for a new episode.
    pub fn reset_all(&mut self, pos: Coord<f32>, velocity: f32) {
        for agent in &mut self.members {
            agent.reset(pos, velocity);
        }
    }

    /// Number of agents still taking part in the episode.
    pub fn active_count(&self) -> usize {
        self.members.iter().filter(|agent| agent.active).count()
    }

    /// Whether every agent has been removed from the episode.
    pub fn all_inactive(&self) -> bool {
        self.members.iter().all(|agent| !agent.active)
    }

    /// Arithmetic mean of member fitness.
    pub fn average_fitness(&self) -> f32 {
        self.members.iter().map(|agent| agent.fitness).sum::<f32>() / self.members.len() as f32
    }

    /// Highest member fitness.
    pub fn best_fitness(&self) -> f32 {
        self.members
            .iter()
            .map(|agent| agent.fitness)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Most obstacles passed by one member.
    pub fn best_milestones(&self) -> u32 {
        self.members
            .iter()
            .map(|agent| agent.milestones)
            .max()
            .unwrap_or(0)
    }

    /// Number of agents kept by `survival_fraction`, or an error if none would be.
    pub fn survivor_count(&self, survival_fraction: f64) -> Result<usize> {
        survivor_count(self.size, survival_fraction)
    }

    /// Replaces the members with the fittest survivors plus mutated offspring.
    ///
    /// Members are ranked by fitness, highest first, with a stable sort so
    /// equal scores keep their current order. Survivors are carried over
    /// unchanged and in rank order; each remaining slot is filled by
    /// reproducing a survivor chosen uniformly at random. An invalid fraction
    /// leaves the population untouched.
    pub fn evolve<R: Rng + ?Sized>(
        &mut self,
        survival_fraction: f64,
        mutation_rate: f32,
        rng: &mut R,
    ) -> Result<()> {
        let survivor_count = self.survivor_count(survival_fraction)?;

        let mut next = std::mem::take(&mut self.members);
        next.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        next.truncate(survivor_count);
        next.reserve_exact(self.size - survivor_count);

        // Survivors occupy the first `survivor_count` slots and are never mutated.
        while next.len() < self.size {
            let parent = rng.gen_range(0..survivor_count);
            let child = next[parent].reproduce(mutation_rate, rng);
            next.push(child);
        }

        log::debug!(
            "generation {} -> {}: kept {} of {} (best fitness {})",
            self.generation,
            self.generation + 1,
            survivor_count,
            self.size,
            next[0].fitness,
        );

        self.members = next;
        self.generation += 1;
        Ok(())
    }
}

/// `floor(size × survival_fraction)`, rejecting fractions outside `(0, 1]`
/// and fractions that keep nobody.
///
/// The product is nudged up by a few ulps so decimal fractions such as
/// `0.57` of 100 give 57 rather than the 56 their binary rounding implies.
pub fn survivor_count(size: usize, survival_fraction: f64) -> Result<usize> {
    let invalid = EvoError::InvalidSurvivalFraction {
        fraction: survival_fraction,
        population_size: size,
    };

    if !(survival_fraction > 0.0 && survival_fraction <= 1.0) {
        return Err(invalid);
    }

    let exact = size as f64 * survival_fraction;
    let count = (exact * (1.0 + 4.0 * f64::EPSILON)).floor() as usize;
    if count == 0 {
        return Err(invalid);
    }

    Ok(count.min(size))
}
