//! Agent state and its decision contract with the environment.
//!
//! An agent owns one brain plus the per-episode state the environment
//! mutates: position, vertical velocity, activity and fitness counters.

use geo::Coord;
use ndarray::Array1;
use ndarray_rand::rand::Rng;

use super::brain::Brain;
use super::error::Result;

/// Upward velocity applied when an agent jumps.
pub const JUMP_FORCE: f32 = 4.0;

/// Brain layout for agents: three sensors, two hidden layers of three, one output.
pub const DEFAULT_TOPOLOGY: [usize; 4] = [3, 3, 3, 1];

/// Noise scale used when reproducing.
pub const DEFAULT_MUTATION_RATE: f32 = 0.01;

/// Output level above which the agent jumps.
const JUMP_THRESHOLD: f32 = 0.5;

/// A simulated agent controlled by a neural network brain.
///
/// Once `active` is false the agent ignores every motion and accounting call
/// until it is [`reset`](Agent::reset).
#[derive(Debug, Clone)]
pub struct Agent {
    /// Neural network that decides when to jump.
    brain: Brain,
    /// Position in 2D space (`y` grows downwards).
    pub pos: Coord<f32>,
    /// Vertical velocity.
    pub velocity: f32,
    /// Whether the agent still takes part in the episode.
    pub active: bool,
    /// Fitness accumulated during the current episode.
    pub fitness: f32,
    /// Obstacles passed during the current episode.
    pub milestones: u32,
}

impl Agent {
    /// Wraps an existing brain with fresh episode state.
    pub fn new(brain: Brain) -> Self {
        Self {
            brain,
            pos: Coord { x: 0.0, y: 0.0 },
            velocity: 0.0,
            active: true,
            fitness: 0.0,
            milestones: 0,
        }
    }

    /// Creates an agent with a freshly randomised brain.
    pub fn new_random<R: Rng + ?Sized>(topology: &[usize], rng: &mut R) -> Result<Self> {
        Ok(Self::new(Brain::new(topology, rng)?))
    }

    /// The agent's brain.
    pub fn brain(&self) -> &Brain {
        &self.brain
    }

    /// Applies one tick of gravity, then lets the brain decide whether to jump.
    ///
    /// A jump overrides this tick's gravity update, so the brain only sees
    /// gravity's effect through its velocity sensor on the next tick.
    pub fn decide(&mut self, inputs: &Array1<f32>, gravity: f32, jump_force: f32) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        let prediction = self.brain.think(inputs)?;
        self.velocity += gravity;

        if prediction[0] > JUMP_THRESHOLD {
            self.jump(jump_force);
        }
        Ok(())
    }

    /// Sets the velocity to an upward impulse.
    pub fn jump(&mut self, jump_force: f32) {
        if self.active {
            self.velocity = -jump_force;
        }
    }

    /// Moves the agent vertically by its velocity.
    pub fn apply_motion(&mut self) {
        if self.active {
            self.pos.y += self.velocity;
        }
    }

    /// Limits the velocity to `[-max_velocity, max_velocity]`.
    pub fn clamp_velocity(&mut self, max_velocity: f32) {
        if self.active {
            self.velocity = self.velocity.clamp(-max_velocity, max_velocity);
        }
    }

    /// Removes the agent from the rest of the episode.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Adds to the fitness of an active agent.
    ///
    /// Fitness never decreases, so negative or non-finite amounts are ignored.
    pub fn reward(&mut self, amount: f32) {
        if self.active && amount.is_finite() && amount >= 0.0 {
            self.fitness += amount;
        }
    }

    /// Counts a passed obstacle for an active agent.
    pub fn pass_milestone(&mut self) {
        if self.active {
            self.milestones += 1;
        }
    }

    /// Reinitialises episode state. The brain is left untouched.
    pub fn reset(&mut self, pos: Coord<f32>, velocity: f32) {
        self.pos = pos;
        self.velocity = velocity;
        self.active = true;
        self.fitness = 0.0;
        self.milestones = 0;
    }

    /// A new agent with an identical but independent brain and default state.
    pub fn fresh_copy(&self) -> Self {
        Self::new(self.brain.clone())
    }

    /// Asexual offspring: a copy of the brain with mutation noise applied.
    pub fn reproduce<R: Rng + ?Sized>(&self, mutation_rate: f32, rng: &mut R) -> Self {
        let mut child_brain = self.brain.clone();
        child_brain.mutate(mutation_rate, rng);

        Self::new(child_brain)
    }
}
