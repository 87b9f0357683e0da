use serde::{Deserialize, Serialize};
use std::path::Path;

use super::agent::{DEFAULT_MUTATION_RATE, DEFAULT_TOPOLOGY, JUMP_FORCE};
use super::brain;
use super::error::{EvoError, Result};
use super::population;

/// Simulation parameters that control the game world and evolution.
///
/// Every field has a default, so a JSON file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Board width.
    pub width: u32,
    /// Board height. Agents leaving `[0, height]` vertically collide.
    pub height: u32,
    /// Height of the ground strip, excluded from pipe gap placement.
    pub ground_height: u32,
    /// Downward acceleration added to velocity each step.
    pub gravity: f32,
    /// Upward velocity set by a jump.
    pub jump_force: f32,
    /// Absolute velocity cap applied after each decision.
    pub max_velocity: f32,
    /// Horizontal distance the pipe moves left per step.
    pub pipe_speed: f32,
    /// Horizontal extent of the pipe.
    pub pipe_width: u32,
    /// Vertical size of the gap between upper and lower pipe.
    pub pipe_gap: u32,
    /// Smallest gap top position.
    pub min_pipe_height: u32,
    /// Horizontal start position of every agent.
    pub start_x: f32,
    /// Initial vertical velocity of every agent.
    pub start_velocity: f32,
    /// Neural network layer dimensions.
    pub topology: Vec<usize>,
    /// Number of agents per generation.
    pub population_size: usize,
    /// Fraction of the population kept as parents, in `(0, 1]`.
    pub survival_fraction: f64,
    /// Standard deviation of the Gaussian noise added when reproducing.
    pub mutation_rate: f32,
    /// Pipes passed after which an episode ends.
    pub score_limit: u32,
    /// Optional hard cap on steps per episode.
    pub max_steps: Option<u64>,
    /// Generations to run from the command line.
    pub generations: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 400,
            height: 600,
            ground_height: 50,
            gravity: 0.25,
            jump_force: JUMP_FORCE,
            max_velocity: 10.0,
            pipe_speed: 4.0,
            pipe_width: 70,
            pipe_gap: 100,
            min_pipe_height: 10,
            start_x: 20.0,
            start_velocity: 0.0,
            topology: DEFAULT_TOPOLOGY.to_vec(),
            population_size: 150,
            survival_fraction: 0.1,
            mutation_rate: DEFAULT_MUTATION_RATE,
            score_limit: 25,
            max_steps: None,
            generations: 10,
        }
    }
}

impl Params {
    /// Parses parameters from JSON, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Loads parameters from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Vertical start position of every agent: the middle of the board.
    pub fn start_y(&self) -> f32 {
        (self.height / 2) as f32
    }

    /// Largest gap top position that keeps the gap above the ground.
    pub fn max_pipe_height(&self) -> u32 {
        self.height
            .saturating_sub(self.ground_height)
            .saturating_sub(self.pipe_gap)
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        brain::validate_topology(&self.topology)?;

        if self.topology[0] != 3 {
            return Err(invalid(format!(
                "topology must take 3 sensor inputs, got {}",
                self.topology[0]
            )));
        }
        if self.population_size == 0 {
            return Err(EvoError::InvalidPopulationSize);
        }

        population::survivor_count(self.population_size, self.survival_fraction)?;

        if self.width == 0 || self.height == 0 {
            return Err(invalid("board must have a positive size".to_string()));
        }
        if self.min_pipe_height > self.max_pipe_height() {
            return Err(invalid(format!(
                "pipe gap of {} does not fit between {} and {}",
                self.pipe_gap,
                self.min_pipe_height,
                self.height.saturating_sub(self.ground_height)
            )));
        }
        if !(self.max_velocity > 0.0) || !(self.pipe_speed > 0.0) {
            return Err(invalid(
                "max_velocity and pipe_speed must be positive".to_string(),
            ));
        }
        if !self.gravity.is_finite() || !self.jump_force.is_finite() {
            return Err(invalid("gravity and jump_force must be finite".to_string()));
        }
        if !(self.mutation_rate >= 0.0) || !self.mutation_rate.is_finite() {
            return Err(invalid(format!(
                "mutation_rate must be a non-negative number, got {}",
                self.mutation_rate
            )));
        }

        Ok(())
    }
}

fn invalid(reason: String) -> EvoError {
    EvoError::InvalidConfig { reason }
}
