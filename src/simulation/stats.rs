//! Per-generation telemetry.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::Result;

/// Fitness summary of one generation, taken at the end of its episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation counter of the population when the summary was taken.
    pub generation: u32,
    /// Number of agents in the population.
    pub population: usize,
    /// Arithmetic mean of member fitness.
    pub average_fitness: f32,
    /// Highest member fitness.
    pub best_fitness: f32,
    /// Most obstacles passed by a single member.
    pub best_milestones: u32,
    /// Simulation steps the episode lasted.
    pub steps: u64,
    /// Obstacles that scrolled past during the episode.
    pub pipes_passed: u32,
}

/// Ordered log of generation summaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    /// Summaries, oldest first.
    pub generations: Vec<GenerationStats>,
}

impl History {
    /// Appends a summary.
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Most recent summary, if any.
    pub fn latest(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }

    /// Best fitness reached by any generation so far.
    pub fn best_fitness(&self) -> f32 {
        self.generations
            .iter()
            .map(|s| s.best_fitness)
            .fold(0.0, f32::max)
    }

    /// Writes the history as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
